//! Authentication and identity management.
//!
//! JWT-based authentication with Argon2 password hashing. Tokens are
//! stateless bearer credentials: a signed claim set with a 30-day expiry,
//! verified by signature alone. There is no revocation list — rotating
//! the signing secret is the only global invalidation mechanism.
//!
//! ## Identity
//!
//! - [`Account`] — Registered user with profile and progress aggregates
//! - [`ProgressSummary`] — Denormalized learning aggregates on the account
//!
//! ## Security
//!
//! - [`Crypto`] — JWT signing and verification
//! - [`Claims`] — JWT payload structure
//! - [`password`] — Argon2 hashing and verification
mod account;
mod claims;
mod crypto;
mod dto;
pub mod password;

pub use account::*;
pub use claims::*;
pub use crypto::*;
pub use dto::*;

#[cfg(feature = "database")]
mod repository;
#[cfg(feature = "database")]
pub use repository::*;

#[cfg(feature = "server")]
mod handlers;
#[cfg(feature = "server")]
mod middleware;
#[cfg(feature = "server")]
pub use handlers::*;
#[cfg(feature = "server")]
pub use middleware::*;

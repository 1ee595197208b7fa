//! Game score recording and ranking.
//!
//! A submitted score becomes an immutable [`sgs_records::ScoreRecord`],
//! then two denormalized aggregates on the owner move: the cumulative
//! total for the game type, and the personal best for the
//! (game type, level) pair. The two aggregate writes are single-row
//! atomic upserts issued after the event insert; they are not wrapped in
//! a transaction with it, so a crash in between leaves the event durable
//! and the aggregates stale. That window is accepted.
//!
//! - [`Tally`] / [`Best`] — the aggregate rows
//! - [`rank()`] — the canonical leaderboard ordering
mod dto;
mod rank;
mod tally;

pub use dto::*;
pub use rank::*;
pub use tally::*;

#[cfg(feature = "database")]
mod repository;
#[cfg(feature = "database")]
pub use repository::*;

#[cfg(feature = "server")]
mod handlers;
#[cfg(feature = "server")]
pub use handlers::*;

//! Per-lesson practice progress.
//!
//! One row per (user, lesson, level); saving overwrites the whole row
//! and bumps the owner's lifetime counters on the side.
mod dto;

pub use dto::*;

#[cfg(feature = "database")]
mod repository;
#[cfg(feature = "database")]
pub use repository::*;

#[cfg(feature = "server")]
mod handlers;
#[cfg(feature = "server")]
pub use handlers::*;

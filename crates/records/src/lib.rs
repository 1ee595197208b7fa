//! Persistent records.
//!
//! The three document shapes the application stores besides accounts:
//!
//! - [`ScoreRecord`] — one immutable completed game attempt
//! - [`Lesson`] — authored lesson content with its [`Sign`] list
//! - [`ProgressRecord`] — per-(user, lesson, level) practice state
//!
//! Each carries its table DDL behind the `database` feature.
mod lesson;
mod progress;
mod score;

pub use lesson::*;
pub use progress::*;
pub use score::*;

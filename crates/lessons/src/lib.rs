//! Lesson authoring and retrieval.
//!
//! Lessons are ordered within their level: the `(level, order)` pair is
//! unique, and both the create pre-check and the unique constraint map
//! to the same order conflict. Updates go through an explicit typed
//! patch ([`LessonPatch`]) where every field is optional and absent
//! fields leave the stored value untouched.
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

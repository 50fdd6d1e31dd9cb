//! Core domain models for course planning.
//!
//! This module contains the input course outline, the emitted study
//! sessions, and lecture classification. These are pure domain models with
//! no I/O dependencies.

pub mod category;
pub mod course;
pub mod session;

pub use category::{Category, classify};
pub use course::{Course, Lecture, Section};
pub use session::{SessionStatus, StoredSession, StudySession};

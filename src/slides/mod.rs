//! Slides and spaced repetition for Recall
//!
//! This module provides:
//! - Collections of prompt/answer slides, kept in insertion order
//! - Difficulty-driven rescheduling (easy doubles, hard halves)
//! - Due-first, random-fallback selection of what to study next
//! - A study session state machine for front ends
//! - JSON persistence of the whole library

pub mod errors;
pub mod library;
pub mod models;
pub mod scheduler;
pub mod selector;
pub mod session;
pub mod storage;

pub use errors::SlideError;
pub use library::Library;
pub use models::*;
pub use scheduler::{apply_review, format_interval, next_interval, preview_intervals, Difficulty};
pub use selector::select_for_study;
pub use session::{StudyPhase, StudySession};
pub use storage::{LibraryStorage, StorageError};

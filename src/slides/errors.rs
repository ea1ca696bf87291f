use thiserror::Error;
use uuid::Uuid;

use super::session::StudyPhase;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SlideError {
    #[error("Slide not found: {0}")]
    SlideNotFound(Uuid),

    #[error("Collection not found: {0}")]
    CollectionNotFound(Uuid),

    #[error("Requested {requested} slides but only {available} available")]
    InsufficientSlides { requested: usize, available: usize },

    #[error("Collection '{0}' has no slides")]
    EmptyCollection(String),

    #[error("Cannot {action} while {phase}")]
    InvalidTransition {
        phase: StudyPhase,
        action: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, SlideError>;

//! A single learner's pass through a collection
//!
//! ```text
//! Idle --next--> PromptShown --reveal--> AnswerShown --rate--> Idle
//! ```
//!
//! `skip` drops back to Idle from either shown state without rescheduling.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::{Result, SlideError};
use super::models::{Collection, Slide};
use super::scheduler::Difficulty;
use super::selector::select_for_study;
use crate::clock::Clock;

/// Where the learner is within one review
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "camelCase")]
pub enum StudyPhase {
    Idle,
    PromptShown { slide_id: Uuid },
    AnswerShown { slide_id: Uuid },
}

impl fmt::Display for StudyPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("idle"),
            Self::PromptShown { .. } => f.write_str("showing the prompt"),
            Self::AnswerShown { .. } => f.write_str("showing the answer"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StudySession {
    phase: StudyPhase,
    reviewed: usize,
    skipped: usize,
}

impl Default for StudySession {
    fn default() -> Self {
        Self::new()
    }
}

impl StudySession {
    pub fn new() -> Self {
        Self {
            phase: StudyPhase::Idle,
            reviewed: 0,
            skipped: 0,
        }
    }

    pub fn phase(&self) -> StudyPhase {
        self.phase
    }

    /// Number of slides rated so far
    pub fn reviewed(&self) -> usize {
        self.reviewed
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    fn invalid(&self, action: &'static str) -> SlideError {
        SlideError::InvalidTransition {
            phase: self.phase,
            action,
        }
    }

    /// Choose the next slide and show its prompt
    pub fn next<'a, R: Rng + ?Sized>(
        &mut self,
        collection: &'a Collection,
        clock: &dyn Clock,
        rng: &mut R,
    ) -> Result<&'a Slide> {
        if self.phase != StudyPhase::Idle {
            return Err(self.invalid("pick the next slide"));
        }

        let slide = select_for_study(collection, clock, rng)?;
        self.phase = StudyPhase::PromptShown { slide_id: slide.id };
        Ok(slide)
    }

    /// Reveal the answer of the slide currently shown
    pub fn reveal(&mut self) -> Result<Uuid> {
        match self.phase {
            StudyPhase::PromptShown { slide_id } => {
                self.phase = StudyPhase::AnswerShown { slide_id };
                Ok(slide_id)
            }
            _ => Err(self.invalid("reveal the answer")),
        }
    }

    /// Record the learner's rating and reschedule the slide
    pub fn rate<'a>(
        &mut self,
        collection: &'a mut Collection,
        difficulty: Difficulty,
        clock: &dyn Clock,
    ) -> Result<&'a Slide> {
        let StudyPhase::AnswerShown { slide_id } = self.phase else {
            return Err(self.invalid("rate the slide"));
        };

        // The slide may have been removed since it was shown
        let result = collection.review(slide_id, difficulty, clock);
        self.phase = StudyPhase::Idle;
        if result.is_ok() {
            self.reviewed += 1;
        }
        result
    }

    /// Abandon the slide currently shown without rescheduling it
    pub fn skip(&mut self) -> Result<()> {
        match self.phase {
            StudyPhase::Idle => Err(self.invalid("skip")),
            _ => {
                self.phase = StudyPhase::Idle;
                self.skipped += 1;
                Ok(())
            }
        }
    }
}

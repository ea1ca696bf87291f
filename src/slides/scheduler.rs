//! Difficulty-driven rescheduling
//!
//! After each review the learner rates the slide:
//! - Easy: the interval doubles
//! - Medium: the interval stays the same
//! - Hard: the interval halves
//!
//! The multiplier is applied to the slide's *previous* interval, the one in
//! force before its most recent reschedule, not to the interval that
//! reschedule just produced.

use std::fmt;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use super::models::Slide;
use crate::clock::Clock;

/// How hard the learner found a slide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Map free-form learner input to a difficulty. Anything unrecognized is Medium.
    pub fn from_input(input: &str) -> Self {
        match input.trim().to_lowercase().as_str() {
            "e" | "easy" | "1" => Self::Easy,
            "h" | "hard" | "3" => Self::Hard,
            _ => Self::Medium,
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::Medium
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        };
        f.write_str(s)
    }
}

/// Compute the next wait interval from the previous one.
/// Easy saturates at `Duration::MAX` instead of overflowing.
pub fn next_interval(previous_interval: Duration, difficulty: Difficulty) -> Duration {
    match difficulty {
        Difficulty::Easy => previous_interval.checked_mul(2).unwrap_or(Duration::MAX),
        Difficulty::Hard => previous_interval / 2,
        Difficulty::Medium => previous_interval,
    }
}

/// Reschedule a slide according to the learner's rating
pub fn apply_review(slide: &mut Slide, difficulty: Difficulty, clock: &dyn Clock) {
    let interval = next_interval(slide.previous_interval(), difficulty);
    log::debug!("Review of slide {} rated {}", slide.id, difficulty);
    slide.reschedule(interval, clock);
    slide.record_review();
}

/// The interval each rating would produce, in `Difficulty::ALL` order.
/// Used to show the learner what each choice means before they pick.
pub fn preview_intervals(slide: &Slide) -> [Duration; 3] {
    Difficulty::ALL.map(|d| next_interval(slide.previous_interval(), d))
}

/// Format an interval as a short human-readable string
pub fn format_interval(interval: Duration) -> String {
    let ms = interval.num_milliseconds();
    if ms <= 0 {
        return "now".to_string();
    }

    let secs = interval.num_seconds();
    if secs < 60 {
        if ms % 1000 == 0 {
            format!("{}s", secs)
        } else {
            format!("{:.1}s", ms as f64 / 1000.0)
        }
    } else if secs < 3600 {
        format!("{}m", secs / 60)
    } else if secs < 86_400 {
        format!("{}h", secs / 3600)
    } else {
        let days = interval.num_days();
        if days < 7 {
            format!("{}d", days)
        } else if days < 30 {
            format!("{}w", days / 7)
        } else if days < 365 {
            format!("{}mo", days / 30)
        } else {
            format!("{}y", days / 365)
        }
    }
}

//! Data models for slides and collections

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::{Result, SlideError};
use super::scheduler::{apply_review, Difficulty};
use crate::clock::Clock;

/// Interval every new slide starts with
pub const INITIAL_INTERVAL_SECS: i64 = 5;

pub fn initial_interval() -> Duration {
    Duration::seconds(INITIAL_INTERVAL_SECS)
}

/// A single fact to be studied: a prompt and the answer it should recall
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slide {
    pub id: Uuid,
    pub prompt: String,
    pub answer: String,
    /// Interval that was active before the most recent reschedule
    #[serde(with = "interval_secs", default = "initial_interval")]
    previous_interval: Duration,
    /// Interval chosen by the most recent reschedule
    #[serde(with = "interval_secs", default = "initial_interval")]
    current_interval: Duration,
    /// When the slide next becomes eligible for review
    due_at: DateTime<Utc>,
    #[serde(default)]
    review_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Slide {
    /// Create a slide that is due immediately
    pub fn new(prompt: impl Into<String>, answer: impl Into<String>, clock: &dyn Clock) -> Self {
        Self::with_interval(prompt, answer, initial_interval(), clock)
    }

    /// Create a slide whose first scheduling decision starts from `interval`
    pub fn with_interval(
        prompt: impl Into<String>,
        answer: impl Into<String>,
        interval: Duration,
        clock: &dyn Clock,
    ) -> Self {
        let now = clock.now();
        let interval = interval.max(Duration::zero());
        Self {
            id: Uuid::new_v4(),
            prompt: prompt.into(),
            answer: answer.into(),
            previous_interval: interval,
            current_interval: interval,
            due_at: now,
            review_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn previous_interval(&self) -> Duration {
        self.previous_interval
    }

    pub fn current_interval(&self) -> Duration {
        self.current_interval
    }

    pub fn due_at(&self) -> DateTime<Utc> {
        self.due_at
    }

    pub fn review_count(&self) -> u32 {
        self.review_count
    }

    /// Time left until the slide is due. Zero or negative means due now.
    pub fn elapsed_wait(&self, clock: &dyn Clock) -> Duration {
        self.due_at - clock.now()
    }

    pub fn is_due(&self, clock: &dyn Clock) -> bool {
        self.elapsed_wait(clock) <= Duration::zero()
    }

    /// Push the due time `new_interval` past now.
    ///
    /// This is the only mutator of scheduling state. Negative intervals are
    /// treated as zero.
    pub fn reschedule(&mut self, new_interval: Duration, clock: &dyn Clock) {
        let new_interval = if new_interval < Duration::zero() {
            log::warn!(
                "Clamping negative interval {}ms to zero for slide {}",
                new_interval.num_milliseconds(),
                self.id
            );
            Duration::zero()
        } else {
            new_interval
        };

        self.previous_interval = self.current_interval;
        self.current_interval = new_interval;
        // Saturate rather than overflow for intervals past the end of time
        self.due_at = clock
            .now()
            .checked_add_signed(new_interval)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        log::debug!(
            "Rescheduled slide {}: interval {}ms, due {}",
            self.id,
            new_interval.num_milliseconds(),
            self.due_at
        );
    }

    pub(crate) fn record_review(&mut self) {
        self.review_count = self.review_count.saturating_add(1);
    }

    /// Replace prompt and/or answer. Scheduling state is left alone.
    pub fn edit(&mut self, prompt: Option<String>, answer: Option<String>, clock: &dyn Clock) {
        if let Some(p) = prompt {
            self.prompt = p;
        }
        if let Some(a) = answer {
            self.answer = a;
        }
        self.updated_at = clock.now();
    }
}

impl fmt::Display for Slide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.prompt)
    }
}

/// A named, ordered group of slides
///
/// `created_at` and `updated_at` are wall-clock audit stamps; they play no
/// part in scheduling, which only ever reads the injected `Clock`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    slides: Vec<Slide>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Collection {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            slides: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.updated_at = Utc::now();
    }

    /// Slides in insertion order
    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn slide(&self, slide_id: Uuid) -> Option<&Slide> {
        self.slides.iter().find(|s| s.id == slide_id)
    }

    pub fn slide_mut(&mut self, slide_id: Uuid) -> Option<&mut Slide> {
        self.slides.iter_mut().find(|s| s.id == slide_id)
    }

    /// Append a slide to the end of the collection
    pub fn add_slide(&mut self, slide: Slide) {
        self.slides.push(slide);
        self.updated_at = Utc::now();
    }

    /// Remove a slide, keeping the order of the rest
    pub fn remove_slide(&mut self, slide_id: Uuid) -> Result<Slide> {
        let pos = self
            .slides
            .iter()
            .position(|s| s.id == slide_id)
            .ok_or(SlideError::SlideNotFound(slide_id))?;

        self.updated_at = Utc::now();
        Ok(self.slides.remove(pos))
    }

    /// Pick `n` distinct slides uniformly at random
    pub fn random_slides<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Result<Vec<&Slide>> {
        if n > self.slides.len() {
            return Err(SlideError::InsufficientSlides {
                requested: n,
                available: self.slides.len(),
            });
        }

        Ok(self.slides.choose_multiple(rng, n).collect())
    }

    /// First slide in insertion order that is due, if any
    pub fn next_due_slide(&self, clock: &dyn Clock) -> Option<&Slide> {
        self.slides.iter().find(|s| s.is_due(clock))
    }

    pub fn due_count(&self, clock: &dyn Clock) -> usize {
        self.slides.iter().filter(|s| s.is_due(clock)).count()
    }

    /// Apply a difficulty rating to one of this collection's slides
    pub fn review(&mut self, slide_id: Uuid, difficulty: Difficulty, clock: &dyn Clock) -> Result<&Slide> {
        let slide = self
            .slide_mut(slide_id)
            .ok_or(SlideError::SlideNotFound(slide_id))?;
        apply_review(slide, difficulty, clock);
        Ok(&*slide)
    }

    pub fn stats(&self, clock: &dyn Clock) -> CollectionStats {
        CollectionStats {
            total_slides: self.slides.len(),
            due_slides: self.due_count(clock),
            next_due_at: self.slides.iter().map(|s| s.due_at).min(),
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Summary counts for a collection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionStats {
    pub total_slides: usize,
    pub due_slides: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_due_at: Option<DateTime<Utc>>,
}

/// Intervals are stored as fractional seconds
mod interval_secs {
    use chrono::Duration;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        let secs = match d.num_microseconds() {
            Some(us) => us as f64 / 1_000_000.0,
            None => d.num_seconds() as f64,
        };
        s.serialize_f64(secs)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(d)?;
        if !secs.is_finite() || secs < 0.0 {
            return Err(serde::de::Error::custom(format!("invalid interval: {}", secs)));
        }
        Ok(Duration::microseconds((secs * 1_000_000.0).round() as i64))
    }
}

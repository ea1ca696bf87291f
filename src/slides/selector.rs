//! Choosing what to study next
//!
//! Due slides come first, in collection order. When nothing is due a random
//! slide is offered instead so a study session never stalls.

use rand::Rng;

use super::errors::{Result, SlideError};
use super::models::{Collection, Slide};
use crate::clock::Clock;

/// Pick the next slide to present from `collection`
pub fn select_for_study<'a, R: Rng + ?Sized>(
    collection: &'a Collection,
    clock: &dyn Clock,
    rng: &mut R,
) -> Result<&'a Slide> {
    if collection.is_empty() {
        return Err(SlideError::EmptyCollection(collection.name.clone()));
    }

    if let Some(slide) = collection.next_due_slide(clock) {
        log::debug!("Selected due slide {} from '{}'", slide.id, collection.name);
        return Ok(slide);
    }

    let slide = collection
        .random_slides(1, rng)?
        .into_iter()
        .next()
        .ok_or_else(|| SlideError::EmptyCollection(collection.name.clone()))?;
    log::debug!("Nothing due in '{}', offering random slide {}", collection.name, slide.id);
    Ok(slide)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use chrono::Duration;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use uuid::Uuid;

    fn five_slides(clock: &ManualClock) -> Collection {
        let mut c = Collection::new("Jokes");
        for i in 0..5 {
            c.add_slide(Slide::new(format!("Q{}", i), format!("A{}", i), clock));
        }
        c
    }

    fn push_out(c: &mut Collection, ids: &[Uuid], clock: &ManualClock) {
        for id in ids {
            c.slide_mut(*id).unwrap().reschedule(Duration::minutes(10), clock);
        }
    }

    #[test]
    fn test_due_slide_wins_regardless_of_rng() {
        let clock = ManualClock::at_epoch();
        let mut c = five_slides(&clock);
        let ids: Vec<Uuid> = c.slides().iter().map(|s| s.id).collect();
        let due = ids[3];
        let not_due: Vec<Uuid> = ids.iter().copied().filter(|id| *id != due).collect();
        push_out(&mut c, &not_due, &clock);

        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            assert_eq!(select_for_study(&c, &clock, &mut rng).unwrap().id, due);
        }
    }

    #[test]
    fn test_random_fallback_matches_random_slides() {
        let clock = ManualClock::at_epoch();
        let mut c = five_slides(&clock);
        let ids: Vec<Uuid> = c.slides().iter().map(|s| s.id).collect();
        push_out(&mut c, &ids, &clock);
        assert!(c.next_due_slide(&clock).is_none());

        let expected = c.random_slides(1, &mut StdRng::seed_from_u64(99)).unwrap()[0].id;
        let picked = select_for_study(&c, &clock, &mut StdRng::seed_from_u64(99)).unwrap();
        assert_eq!(picked.id, expected);
    }

    #[test]
    fn test_empty_collection() {
        let clock = ManualClock::at_epoch();
        let c = Collection::new("Nothing here");
        let mut rng = StdRng::seed_from_u64(0);

        let err = select_for_study(&c, &clock, &mut rng).unwrap_err();
        assert_eq!(err, SlideError::EmptyCollection("Nothing here".to_string()));
    }

    #[test]
    fn test_slide_becomes_due_again() {
        let clock = ManualClock::at_epoch();
        let mut c = five_slides(&clock);
        let ids: Vec<Uuid> = c.slides().iter().map(|s| s.id).collect();
        push_out(&mut c, &ids, &clock);
        c.slide_mut(ids[4]).unwrap().reschedule(Duration::seconds(30), &clock);

        clock.advance(Duration::seconds(30));
        let mut rng = StdRng::seed_from_u64(5);
        assert_eq!(select_for_study(&c, &clock, &mut rng).unwrap().id, ids[4]);
    }
}

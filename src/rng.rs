//! Start-room selection
//!
//! The player begins in a uniformly random location other than the finish.
//! Tests (and the `seed` config knob) use the predictable mode so a whole
//! session is reproducible.

use crate::world::World;
use rand::{rngs::StdRng, Rng, RngCore, SeedableRng};

/// PickMode controls picker behaviour. May be predictable for testing or
/// truly random for gameplay.
pub enum PickMode {
    Predictable,
    RandomUniform,
}

pub struct StartPicker {
    rng: Box<dyn RngCore>,
    mode: PickMode,
}

impl StartPicker {
    pub fn new_uniform() -> StartPicker {
        StartPicker {
            rng: Box::new(rand::thread_rng()),
            mode: PickMode::RandomUniform,
        }
    }

    pub fn new_predictable(seed: u64) -> StartPicker {
        StartPicker {
            rng: Box::new(StdRng::seed_from_u64(seed)),
            mode: PickMode::Predictable,
        }
    }

    pub fn is_predictable(&self) -> bool {
        matches!(self.mode, PickMode::Predictable)
    }

    /// Pick a starting location: uniform over every location except
    /// `finish`. Returns `None` when the finish is the only location.
    pub fn pick_start<'w>(&mut self, world: &'w World, finish: &str) -> Option<&'w str> {
        let candidates: Vec<&str> = world.names().filter(|name| *name != finish).collect();
        if candidates.is_empty() {
            return None;
        }
        let index = self.rng.gen_range(0..candidates.len());
        Some(candidates[index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::World;
    use test_log::test;

    fn world() -> World {
        World::from_json_str(
            r#"{"A": {"text": "a"}, "B": {"text": "b"}, "Finish": {"text": "f"}}"#,
        )
        .unwrap()
    }

    #[test]
    fn never_picks_the_finish() {
        let w = world();
        let mut picker = StartPicker::new_uniform();
        for _ in 0..50 {
            let start = picker.pick_start(&w, "Finish").unwrap();
            assert_ne!(start, "Finish");
        }
    }

    #[test]
    fn seeded_picks_are_reproducible() {
        let w = world();
        let first = StartPicker::new_predictable(42).pick_start(&w, "Finish");
        let second = StartPicker::new_predictable(42).pick_start(&w, "Finish");
        assert_eq!(first, second);
    }

    #[test]
    fn single_room_world_has_no_start() {
        let w = World::from_json_str(r#"{"Finish": {"text": "f"}}"#).unwrap();
        let mut picker = StartPicker::new_predictable(1);
        assert!(picker.pick_start(&w, "Finish").is_none());
    }
}

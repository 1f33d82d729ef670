//! Progress tracker - per-session game state
//!
//! One tracker exists per game session and dies with it; nothing here is
//! persisted. The original implementation kept these as process-wide
//! globals (`collection`, `found_obj`, `rooms`, `num_rooms`); they live in
//! one owned value now so the game loop is the only writer.
//!
//! The unseen-object set is a multiset: object names are not guaranteed
//! unique across the world, and a first sighting consumes exactly one
//! occurrence of the name.

use crate::world::World;
use indexmap::IndexSet;
use log::debug;

#[derive(Debug)]
pub struct ProgressTracker {
    current_location: String,
    visited_rooms: IndexSet<String>,
    collected_specials: Vec<String>,
    found_count: usize,
    remaining_unseen: Vec<String>,
}

impl ProgressTracker {
    /// Start a session at `start`. The starting room counts as visited
    /// from the outset.
    pub fn new(world: &World, start: &str) -> ProgressTracker {
        let mut visited_rooms = IndexSet::new();
        visited_rooms.insert(start.to_string());
        ProgressTracker {
            current_location: start.to_string(),
            visited_rooms,
            collected_specials: Vec::new(),
            found_count: 0,
            remaining_unseen: world.object_roster(),
        }
    }

    pub fn current_location(&self) -> &str {
        &self.current_location
    }

    /// Move to `name`, counting it as visited if this is the first entry.
    pub fn enter(&mut self, name: &str) {
        self.current_location = name.to_string();
        if self.visited_rooms.insert(name.to_string()) {
            debug!("new room visited: {} ({} total)", name, self.visited_rooms.len());
        }
    }

    pub fn visited_count(&self) -> usize {
        self.visited_rooms.len()
    }

    /// Has an object with this name already been described to the player?
    /// True once every occurrence of the name has been consumed.
    pub fn is_seen(&self, name: &str) -> bool {
        !self.remaining_unseen.iter().any(|n| n == name)
    }

    /// Unseen-name occurrences left, for pass-local bookkeeping in the
    /// renderer.
    pub fn unseen_occurrences(&self, name: &str) -> usize {
        self.remaining_unseen.iter().filter(|n| *n == name).count()
    }

    /// Record a first sighting: consume one occurrence of the name and
    /// bump the found counter.
    pub fn mark_seen(&mut self, name: &str) {
        if let Some(pos) = self.remaining_unseen.iter().position(|n| n == name) {
            self.remaining_unseen.remove(pos);
            self.found_count += 1;
            debug!("object sighted: {} (found {} so far)", name, self.found_count);
        }
    }

    pub fn found_count(&self) -> usize {
        self.found_count
    }

    pub fn is_collected(&self, name: &str) -> bool {
        self.collected_specials.iter().any(|n| n == name)
    }

    /// Add a special to the collection. Duplicates are ignored so the
    /// collection stays a unique, discovery-ordered list.
    pub fn collect_special(&mut self, name: &str) {
        if !self.is_collected(name) {
            self.collected_specials.push(name.to_string());
        }
    }

    pub fn collected_specials(&self) -> &[String] {
        &self.collected_specials
    }
}

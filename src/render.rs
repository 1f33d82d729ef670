//! Room renderer - turns a location plus tracker state into a structured
//! description
//!
//! The renderer is pure: it reads the tracker but never writes it. Instead
//! of printed lines it returns `ObjectEvent`s; the game loop applies them
//! to the tracker and handles the pickup interaction for specials. (The
//! original built one big description string and sliced it back apart by
//! line index; the structured record replaces that round-trip.)
//!
//! Object-pass semantics, preserved exactly from the original even though
//! the early exit is almost certainly an accident there: the pass walks the
//! location's object list in order, and
//!
//! * an already-seen object yields a passive sighting and the pass moves on,
//! * a first-sighted special yields a pickup offer and the pass moves on,
//! * a first-sighted normal object, or a first-sighted duplicate of an
//!   already-collected special, ends the pass immediately - objects later
//!   in the list are not evaluated this call.
//!
//! The asymmetry is observable in output ordering, so it is load-bearing.

use crate::tracker::ProgressTracker;
use crate::world::Location;
use log::debug;
use std::collections::HashMap;

/// What happened to one object during a render pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectEvent {
    /// Already described on an earlier visit; passive "Buddy sees" line.
    Spotted(String),
    /// First sighting of a special object; the player gets a pickup choice.
    SpecialFound(String),
    /// First sighting of a normal object. Ends the pass.
    NormalFound(String),
    /// First sighting of a duplicate of an already-collected special.
    /// Ends the pass, no line.
    SpecialRepeat(String),
}

impl ObjectEvent {
    pub fn name(&self) -> &str {
        match self {
            ObjectEvent::Spotted(n)
            | ObjectEvent::SpecialFound(n)
            | ObjectEvent::NormalFound(n)
            | ObjectEvent::SpecialRepeat(n) => n,
        }
    }

    /// Does this event consume an occurrence from the unseen set?
    pub fn is_first_sighting(&self) -> bool {
        !matches!(self, ObjectEvent::Spotted(_))
    }
}

/// A rendered room: narrative text, the object events for this pass, and
/// one display line per available move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedRoom {
    pub narrative: String,
    pub objects: Vec<ObjectEvent>,
    pub move_lines: Vec<String>,
}

/// Render `location` against the current tracker state.
pub fn render(location: &Location, tracker: &ProgressTracker) -> RenderedRoom {
    RenderedRoom {
        narrative: location.text.clone(),
        objects: object_pass(location, tracker),
        move_lines: move_lines(location),
    }
}

/// One line per move, in the world document's declaration order.
pub fn move_lines(location: &Location) -> Vec<String> {
    location
        .moves
        .iter()
        .map(|(keyword, destination)| format!("'{keyword}' to go to {destination}"))
        .collect()
}

fn object_pass(location: &Location, tracker: &ProgressTracker) -> Vec<ObjectEvent> {
    let mut events = Vec::new();
    // Pass-local bookkeeping so the pure renderer sees the same evolving
    // state the tracker will after the loop applies these events.
    let mut consumed: HashMap<&str, usize> = HashMap::new();
    let mut offered: Vec<&str> = Vec::new();

    for obj in &location.objects {
        let name = obj.name.as_str();
        let used = consumed.get(name).copied().unwrap_or(0);
        if tracker.unseen_occurrences(name) > used {
            *consumed.entry(name).or_insert(0) += 1;
            if obj.kind.is_special() {
                if tracker.is_collected(name) || offered.contains(&name) {
                    debug!("object pass stops at repeated special '{}'", name);
                    events.push(ObjectEvent::SpecialRepeat(obj.name.clone()));
                    break;
                }
                offered.push(name);
                events.push(ObjectEvent::SpecialFound(obj.name.clone()));
            } else {
                debug!("object pass stops at new normal object '{}'", name);
                events.push(ObjectEvent::NormalFound(obj.name.clone()));
                break;
            }
        } else {
            events.push(ObjectEvent::Spotted(obj.name.clone()));
        }
    }
    events
}

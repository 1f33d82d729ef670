//! Navigation engine - resolving a typed move keyword against a location
//!
//! A rejected move is the routine outcome of a typo, so it comes back as a
//! value in the `Err` position rather than anything fatal. The game loop
//! prints guidance and re-prompts.

use crate::world::Location;
use log::debug;
use std::fmt;

/// The keyword did not match any move out of the current location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRejected {
    pub keyword: String,
}

impl fmt::Display for MoveRejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no move '{}' from here", self.keyword)
    }
}

/// Resolve `keyword` against the location's moves mapping.
///
/// The keyword is lower-cased before lookup; move keywords in the world
/// data are expected to be lower-case already. No side effects - the
/// caller decides what a hit or miss means.
pub fn attempt_move<'a>(location: &'a Location, keyword: &str) -> Result<&'a str, MoveRejected> {
    let keyword = keyword.to_lowercase();
    match location.moves.get(&keyword) {
        Some(destination) => {
            debug!("move '{}' resolves to '{}'", keyword, destination);
            Ok(destination)
        }
        None => Err(MoveRejected { keyword }),
    }
}

//! World model - the static location table the whole game runs against
//!
//! The world is loaded once at startup from a JSON document mapping location
//! names to their narrative text, objects, and outgoing moves. After loading
//! it is immutable; every other component only reads from it. Aggregate
//! counts (rooms, objects, special objects) are scanned once here so the
//! summary reporter never has to walk the table again.

use indexmap::IndexMap;
use log::{debug, info};
use serde::Deserialize;
use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Object classification. The source data only distinguishes "special"
/// (pickup-tracked, scored at game end) from everything else, so any
/// unrecognized type string lands in `Normal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Special,
    Normal,
}

impl<'de> Deserialize<'de> for ObjectKind {
    fn deserialize<D>(deserializer: D) -> Result<ObjectKind, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(match s.as_str() {
            "special" => ObjectKind::Special,
            _ => ObjectKind::Normal,
        })
    }
}

/// A single object placed in a location.
#[derive(Debug, Clone, Deserialize)]
pub struct Object {
    pub name: String,
    #[serde(rename = "type", default = "ObjectKind::normal")]
    pub kind: ObjectKind,
}

impl ObjectKind {
    fn normal() -> ObjectKind {
        ObjectKind::Normal
    }

    pub fn is_special(self) -> bool {
        self == ObjectKind::Special
    }
}

/// One node in the world graph.
///
/// `moves` keeps declaration order (the renderer enumerates move options in
/// the order the world document lists them). Destination names are trusted
/// to reference real locations; a dangling destination simply fails lookup
/// at move time.
#[derive(Debug, Clone, Deserialize)]
pub struct Location {
    pub text: String,
    #[serde(default)]
    pub objects: Vec<Object>,
    #[serde(default)]
    pub moves: IndexMap<String, String>,
}

/// Aggregate counts scanned once at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Totals {
    pub rooms: usize,
    pub objects: usize,
    pub special_objects: usize,
}

/// The immutable world: location table plus precomputed totals.
#[derive(Debug)]
pub struct World {
    locations: IndexMap<String, Location>,
    totals: Totals,
}

/// Error loading the world document. Fatal at startup - the game cannot
/// build any state without a world.
#[derive(Debug)]
pub enum WorldLoadError {
    Io(io::Error),
    Parse(String),
    Empty,
}

impl fmt::Display for WorldLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorldLoadError::Io(e) => write!(f, "cannot read world file: {e}"),
            WorldLoadError::Parse(msg) => write!(f, "malformed world data: {msg}"),
            WorldLoadError::Empty => write!(f, "world data contains no locations"),
        }
    }
}

impl std::error::Error for WorldLoadError {}

impl From<io::Error> for WorldLoadError {
    fn from(e: io::Error) -> Self {
        WorldLoadError::Io(e)
    }
}

impl World {
    /// Load the world from a JSON file on disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<World, WorldLoadError> {
        debug!("loading world from {}", path.as_ref().display());
        let file = File::open(path)?;
        World::from_reader(file)
    }

    /// Load the world from any reader producing the JSON document.
    pub fn from_reader<R: Read>(reader: R) -> Result<World, WorldLoadError> {
        let locations: IndexMap<String, Location> = serde_json::from_reader(reader)
            .map_err(|e| WorldLoadError::Parse(e.to_string()))?;
        World::from_locations(locations)
    }

    /// Parse the world from an in-memory JSON string (tests mostly).
    pub fn from_json_str(json: &str) -> Result<World, WorldLoadError> {
        let locations: IndexMap<String, Location> =
            serde_json::from_str(json).map_err(|e| WorldLoadError::Parse(e.to_string()))?;
        World::from_locations(locations)
    }

    fn from_locations(locations: IndexMap<String, Location>) -> Result<World, WorldLoadError> {
        if locations.is_empty() {
            return Err(WorldLoadError::Empty);
        }

        let mut objects = 0;
        let mut special_objects = 0;
        for loc in locations.values() {
            for obj in &loc.objects {
                objects += 1;
                if obj.kind.is_special() {
                    special_objects += 1;
                }
            }
        }

        let totals = Totals {
            rooms: locations.len(),
            objects,
            special_objects,
        };
        info!(
            "world loaded: {} rooms, {} objects ({} special)",
            totals.rooms, totals.objects, totals.special_objects
        );

        Ok(World { locations, totals })
    }

    /// All location names, in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.locations.keys().map(String::as_str)
    }

    pub fn location(&self, name: &str) -> Option<&Location> {
        self.locations.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.locations.contains_key(name)
    }

    pub fn totals(&self) -> Totals {
        self.totals
    }

    /// Every object name in the world, in declaration order, duplicates
    /// included. This seeds the tracker's unseen-object working set; the
    /// source data does not guarantee unique names so the roster is a
    /// multiset.
    pub fn object_roster(&self) -> Vec<String> {
        self.locations
            .values()
            .flat_map(|loc| loc.objects.iter().map(|o| o.name.clone()))
            .collect()
    }
}

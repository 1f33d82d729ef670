//! Scripted whole-session tests over the shipped sample world
//!
//! These drive the library directly (no terminal, no files on disk beyond
//! the world document) with canned input, and assert on the full session
//! transcript.

use elfventure::game::{GameSession, Outcome};
use elfventure::input::ScriptedInput;
use elfventure::store::MemoryStore;
use elfventure::world::World;
use std::path::PathBuf;

const FINISH: &str = "Hobbs' Apartment";

fn sample_world() -> World {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("resources/worlds/elf.json");
    World::load(path).expect("sample world should load")
}

fn play(start: &str, lines: &[&str]) -> (Outcome, String, MemoryStore) {
    let world = sample_world();
    let mut input = ScriptedInput::new(lines.iter().copied());
    let mut store = MemoryStore::new();
    let mut out = Vec::new();
    let outcome = GameSession::new(&world, FINISH, &mut input, &mut store, &mut out)
        .run(start)
        .expect("session should not error");
    (outcome, String::from_utf8(out).expect("utf8 output"), store)
}

#[test]
fn sample_world_loads_with_expected_totals() {
    let world = sample_world();
    let totals = world.totals();
    assert_eq!(totals.rooms, 7);
    assert_eq!(totals.objects, 6);
    assert_eq!(totals.special_objects, 3);
}

#[test]
fn straight_run_to_the_finish() {
    // North Pole -> forest -> tunnel -> Gimbels -> Empire State -> apartment.
    // Pickup answers interleave where specials are first sighted.
    let (outcome, output, store) = play(
        "North Pole",
        &[
            "buddy", "yes", // Snow Globe at the North Pole
            "south", "south", "east", "yes", // Etch A Sketch at Gimbels
            "east", "up",
        ],
    );
    assert_eq!(outcome, Outcome::Finished);
    assert!(output.contains("Welcome to the Elf Adventure Game:"));
    assert!(output.contains("Buddy picked up Snow Globe for safe keeping."));
    assert!(output.contains("Buddy picked up Etch A Sketch for safe keeping."));
    assert!(output.contains("CONGRATS! You helped Buddy find his Dad in New York!"));
    assert!(output.contains("You have collected: Snow Globe and Etch A Sketch"));
    // 2 of 3 specials, percentages to two decimals.
    assert!(output.contains("2/3 (66.67%) collectable objects"));
    // 6 of 7 rooms (Central Park skipped).
    assert!(output.contains("6/7 (85.71%) rooms visited"));
    // Last persisted position is the room before the finish.
    assert_eq!(
        store.users.get("buddy").map(String::as_str),
        Some("Empire State Building")
    );
}

#[test]
fn full_clear_earns_every_achievement() {
    // Visit every room, answering yes to each special. The doubling back
    // through the North Pole and Gimbels also exercises the passive
    // "Buddy sees" lines on revisit.
    let (outcome, output, _) = play(
        "North Pole",
        &[
            "buddy", "yes", // Snow Globe
            "south", "north", // revisit the North Pole
            "south", "south", "east", "yes", // Etch A Sketch at Gimbels
            "west", "east", // revisit Gimbels
            "north", "yes", // World's Best Coffee Cup in Central Park
            "south", "east", "up",
        ],
    );
    assert_eq!(outcome, Outcome::Finished);
    assert!(output.contains("You found all the collectable objects!"));
    assert!(output.contains("You found all the objects!"));
    assert!(output.contains("You visited all the rooms!"));
    assert!(output.contains(
        "You have collected: Snow Globe, Etch A Sketch, and World's Best Coffee Cup"
    ));
}

#[test]
fn quit_keywords_end_the_session_without_a_summary() {
    for quit_word in ["quit", "exit", "QUIT", "Exit"] {
        let (outcome, output, _) = play("Lincoln Tunnel", &["buddy", quit_word]);
        assert_eq!(outcome, Outcome::Quit, "keyword {quit_word}");
        assert!(output.contains("You have quit the game."));
        assert!(output.contains("Thanks for playing."));
        assert!(!output.contains("rooms visited"));
    }
}

#[test]
fn move_options_render_in_declaration_order() {
    let (_, output, _) = play("Gimbels", &["buddy", "yes", "quit"]);
    let west = output.find("'west' to go to Lincoln Tunnel").unwrap();
    let north = output.find("'north' to go to Central Park").unwrap();
    let east = output.find("'east' to go to Empire State Building").unwrap();
    assert!(west < north && north < east);
}

#[test]
fn invalid_input_keeps_the_player_in_place() {
    let (outcome, output, _) = play(
        "Empire State Building",
        &["buddy", "sideways", "elevator", "up"],
    );
    assert_eq!(outcome, Outcome::Finished);
    let invalid_count = output.matches("Invalid choice.").count();
    assert_eq!(invalid_count, 2);
}

#[test]
fn declined_pickup_still_counts_toward_collection() {
    // "no" to the Coffee Cup, "no" to the Etch A Sketch on the way out:
    // both still land in the collection.
    let (outcome, output, _) = play(
        "Central Park",
        &["buddy", "no", "south", "no", "east", "up"],
    );
    assert_eq!(outcome, Outcome::Finished);
    assert!(output.contains("Buddy pick up World's Best Coffee Cup anyways."));
    assert!(output.contains("Buddy pick up Etch A Sketch anyways."));
    assert!(
        output.contains("You have collected: World's Best Coffee Cup and Etch A Sketch")
    );
    assert!(output.contains("2/3 (66.67%) collectable objects"));
}

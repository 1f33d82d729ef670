//! Summary reporter - end-of-game statistics
//!
//! Three completion ratios (special objects, all objects, rooms) against
//! the totals the world precomputed at load time. A zero total never
//! reaches the division - it renders as 0/0 (0.00%) and the achievement
//! line is skipped.

use crate::tracker::ProgressTracker;
use crate::world::Totals;

/// Format a collection as a natural-language list: "a", "a and b",
/// "a, b, and c". Empty input gives an empty string.
pub fn comma_list(items: &[String]) -> String {
    match items {
        [] => String::new(),
        [only] => only.clone(),
        [first, second] => format!("{first} and {second}"),
        [init @ .., last] => format!("{}, and {last}", init.join(", ")),
    }
}

/// One statistics line: the achievement text at exactly 100%, otherwise
/// "k/n (pct%)" with the percentage rounded to two decimals. A zero total
/// short-circuits to 0.00% so there is never a division by zero.
pub fn ratio_line(count: usize, total: usize, achievement: &str, label: &str) -> String {
    if total == 0 {
        return format!("{count}/0 (0.00%) {label}");
    }
    if count == total {
        return achievement.to_string();
    }
    let pct = (count as f64 / total as f64) * 100.0;
    format!("{count}/{total} ({pct:.2}%) {label}")
}

/// The full end-of-game report.
pub fn report(tracker: &ProgressTracker, totals: Totals) -> String {
    let mut out = String::new();
    out.push_str("You have collected: ");
    out.push_str(&comma_list(tracker.collected_specials()));
    out.push('\n');
    out.push_str(&ratio_line(
        tracker.collected_specials().len(),
        totals.special_objects,
        "You found all the collectable objects!",
        "collectable objects",
    ));
    out.push('\n');
    out.push_str(&ratio_line(
        tracker.found_count(),
        totals.objects,
        "You found all the objects!",
        "total found objects",
    ));
    out.push('\n');
    out.push_str(&ratio_line(
        tracker.visited_count(),
        totals.rooms,
        "You visited all the rooms!",
        "rooms visited",
    ));
    out.push('\n');
    out
}

//! Random display names and slugs for freshly imported resumes.

use rand::seq::SliceRandom;

const ADJECTIVES: &[&str] = &[
    "Amber", "Bold", "Brave", "Bright", "Calm", "Clever", "Crimson", "Daring", "Eager", "Gentle",
    "Golden", "Keen", "Lively", "Lucky", "Mellow", "Nimble", "Polished", "Quiet", "Rapid",
    "Scarlet", "Silver", "Steady", "Swift", "Vivid", "Wise",
];

const NOUNS: &[&str] = &[
    "Falcon", "Harbor", "Meadow", "Summit", "River", "Beacon", "Canyon", "Cedar", "Comet",
    "Ember", "Garnet", "Glacier", "Horizon", "Lantern", "Maple", "Orchid", "Pebble", "Quartz",
    "Sparrow", "Thicket", "Tundra", "Willow", "Zephyr", "Aspen", "Breeze",
];

/// Two-word display name, e.g. "Crimson Falcon". The provenance suffix
/// (" (File)", " (LinkedIn)") is appended by the orchestrator.
pub fn generate_random_name() -> String {
    let mut rng = rand::thread_rng();
    let adjective = ADJECTIVES.choose(&mut rng).copied().unwrap_or("Nimble");
    let noun = NOUNS.choose(&mut rng).copied().unwrap_or("Falcon");
    format!("{adjective} {noun}")
}

/// Lowercases and collapses every non-alphanumeric run into a single dash.
pub fn kebab_case(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_dash = false;
    for c in input.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}

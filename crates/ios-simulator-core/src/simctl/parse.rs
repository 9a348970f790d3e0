//! Parsing of `simctl list devices` output

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::BootedSimulator;

/// Marker simctl prints after the UDID of a running device
pub const BOOTED_MARKER: &str = "(Booted)";

// First parenthesised group of hex digits and hyphens, led by a hex digit
static DEVICE_ID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\(([0-9A-Fa-f][0-9A-Fa-f-]*)\)").expect("device id pattern is valid")
});

/// Finds the first booted simulator in a device listing
///
/// A line qualifies when it contains `(Booted)`. The id is the first
/// parenthesised run of hex digits and hyphens starting with a hex digit;
/// the name is the trimmed text before it. Booted lines without an id group are skipped.
///
/// # Examples
///
/// ```
/// use ios_simulator_core::simctl::parse::parse_booted_simulator;
///
/// let listing = "-- iOS 17.0 --\n    iPhone 15 (ABCD-1234-EF) (Booted)\n";
/// let sim = parse_booted_simulator(listing).unwrap();
/// assert_eq!(sim.name, "iPhone 15");
/// assert_eq!(sim.id, "ABCD-1234-EF");
/// ```
pub fn parse_booted_simulator(listing: &str) -> Option<BootedSimulator> {
    listing
        .lines()
        .filter(|line| line.contains(BOOTED_MARKER))
        .find_map(parse_device_line)
}

fn parse_device_line(line: &str) -> Option<BootedSimulator> {
    let captures = DEVICE_ID.captures(line)?;
    let group = captures.get(0)?;
    let id = captures.get(1)?.as_str();

    Some(BootedSimulator {
        name: line[..group.start()].trim().to_string(),
        id:   id.to_string(),
    })
}

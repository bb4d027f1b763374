//! Turn-by-turn instruction formatting
//!
//! Pure functions that turn the provider's maneuver points into spoken
//! Korean instructions and short labels for auxiliary display.

use domain::entities::RouteResponse;
use domain::value_objects::{GeoLocation, RoadType, TurnType};
use serde::Serialize;

/// Phrase the provider uses for "crosswalk, then ..."
const CROSSWALK_THEN: &str = "횡단보도 후";

/// Replacement for [`CROSSWALK_THEN`]: "after crossing the crosswalk"
const AFTER_CROSSING: &str = "횡단보도를 건넌 후";

/// Marker of a plain "move along ..." description
const MOVING_MARKER: &str = "이동";

/// Prefix for unguided movement, "go straight from the start"
const STRAIGHT_FROM_START: &str = "출발지에서 직진";

/// Fixed instruction at the destination
pub const ARRIVAL_INSTRUCTION: &str = "목적지 도착";

/// Format a single maneuver as a spoken instruction
///
/// The crosswalk phrase is rewritten first. Known maneuver codes prefix the
/// description with their phrase; arrival (201) discards the description.
/// Any other code prefixes a moving description with "go straight from the
/// start" and passes everything else through.
#[must_use]
pub fn format_instruction(description: &str, turn_type: i32) -> String {
    let instruction = description.replace(CROSSWALK_THEN, AFTER_CROSSING);

    let turn = TurnType::from_code(turn_type);
    if turn == TurnType::Destination {
        return ARRIVAL_INSTRUCTION.to_string();
    }

    match turn.phrase() {
        Some(phrase) => format!("{phrase}, {instruction}"),
        None if description.contains(MOVING_MARKER) => {
            format!("{STRAIGHT_FROM_START} {instruction}")
        },
        None => instruction,
    }
}

/// Short direction label for a maneuver code, empty if unmapped
#[must_use]
pub const fn direction_description(turn_type: i32) -> &'static str {
    TurnType::from_code(turn_type).label()
}

/// Label for a segment's road type, empty if absent or unclassified
#[must_use]
pub fn road_type_description(road_type: Option<i32>) -> &'static str {
    road_type.map_or("", |code| RoadType::from_code(code).label())
}

/// Instructions for every described maneuver point of a route, in order
///
/// A point without a turn type is formatted as code 0.
#[must_use]
pub fn generate_navigation_instructions(route: &RouteResponse) -> Vec<String> {
    route
        .maneuver_points()
        .filter_map(|feature| {
            let description = feature.properties.description.as_deref()?;
            Some(format_instruction(
                description,
                feature.properties.turn_type.unwrap_or(0),
            ))
        })
        .collect()
}

/// A maneuver with everything a list row needs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManeuverStep {
    /// Spoken instruction
    pub instruction: String,
    /// Short direction label, may be empty
    pub direction: &'static str,
    /// Road label of the segment that follows, may be empty
    pub road: &'static str,
    /// Where the maneuver happens
    pub location: Option<GeoLocation>,
}

/// Pair each instruction with its labels and position
///
/// Yields exactly one step per entry of [`generate_navigation_instructions`].
#[must_use]
pub fn describe_steps(route: &RouteResponse) -> Vec<ManeuverStep> {
    let mut steps = Vec::new();

    for (i, feature) in route.features.iter().enumerate() {
        let Some(description) = feature.properties.description.as_deref() else {
            continue;
        };
        if !feature.is_point() {
            continue;
        }

        let turn_type = feature.properties.turn_type.unwrap_or(0);
        let next_road = route.features[i + 1..]
            .iter()
            .take_while(|f| !f.is_point())
            .find_map(|f| f.properties.road_type);

        steps.push(ManeuverStep {
            instruction: format_instruction(description, turn_type),
            direction: direction_description(turn_type),
            road: road_type_description(next_road),
            location: feature.point_location(),
        });
    }

    steps
}

//! Application services - Use case implementations

pub mod instruction_formatter;
pub mod location_provider;
mod navigation_service;

pub use instruction_formatter::{
    ARRIVAL_INSTRUCTION, ManeuverStep, describe_steps, direction_description, format_instruction,
    generate_navigation_instructions, road_type_description,
};
pub use location_provider::{
    DEFAULT_BUFFER, LocationEvent, LocationProvider, LocationPublisher, location_channel,
};
pub use navigation_service::{NavigationConfig, NavigationService, SessionState};

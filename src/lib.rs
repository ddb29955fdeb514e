pub mod artifacts;
pub mod calendar;
pub mod core;
pub mod events;
pub mod fetch;

// Re-exports
pub use crate::core::config::RaidwatchConfig;
pub use events::parsing::{extract_event_details, EventDetails};

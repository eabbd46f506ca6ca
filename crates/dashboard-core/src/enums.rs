//! Enumeration types used throughout the dashboard.

use serde::{Deserialize, Serialize};

/// Category tag carried by a waypoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaypointKind {
    #[default]
    Navigation,
    Checkpoint,
    Destination,
}

/// Classification of a radar contact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetClass {
    #[default]
    Unknown,
    Friendly,
    Neutral,
    Hostile,
}

/// Mission timer state machine phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerPhase {
    #[default]
    Stopped,
    Running,
}

/// Colour band of the speed readout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpeedBand {
    #[default]
    Low,
    Medium,
    High,
}

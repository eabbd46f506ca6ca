//! Control signals and store mutations sent by external collaborators.
//!
//! Commands are queued and applied between ticks, never inside one.

use serde::{Deserialize, Serialize};

use crate::state::{RadarTarget, Waypoint};

/// All collaborator actions the dashboard accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MissionCommand {
    // --- Mission control ---
    /// Start the mission countdown.
    StartMission,
    /// Restore position, path and timer to their startup values.
    ResetMission,
    StartTimer,
    StopTimer,

    // --- Waypoint queue ---
    EnqueueWaypoint { waypoint: Waypoint },
    /// Replace the whole queue. Rejected entirely if any point is non-finite.
    ReplaceWaypoints { waypoints: Vec<Waypoint> },
    ClearWaypoints,

    // --- Radar contacts ---
    AddRadarTarget { target: RadarTarget },
    ReplaceRadarTargets { targets: Vec<RadarTarget> },
    ClearRadarTargets,
    /// Drop contacts whose last report is older than `max_age_secs`,
    /// or the configured contact timeout when omitted.
    PruneStaleTargets {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_age_secs: Option<f64>,
    },

    // --- Robot ---
    /// Set the displayed speed, clamped to the configured range.
    SetSpeed { speed: f64 },
}

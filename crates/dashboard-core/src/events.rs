//! Events emitted by the simulation for status panels and logs.

use serde::{Deserialize, Serialize};

use crate::types::Point;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DashboardEvent {
    MissionStarted,
    MissionReset,
    TimerStarted,
    TimerStopped,
    /// The countdown underflowed and the timer forced itself to stop.
    TimerExpired,
    /// The robot reached the head of the waypoint queue.
    WaypointReached {
        id: Option<String>,
        position: Point,
        remaining: usize,
    },
    /// The last waypoint was consumed; the robot now holds position.
    RouteComplete,
    /// A collaborator mutation was refused at the store boundary.
    CommandRejected { reason: String },
    /// Stale radar contacts were dropped.
    TargetsPruned { count: usize },
}

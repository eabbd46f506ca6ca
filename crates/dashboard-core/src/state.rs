//! Dashboard state: robot kinematics, mission timer and radar contacts.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::{TargetClass, TimerPhase, WaypointKind};
use crate::types::Point;

/// A target point the robot advances toward. Removed once reached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub position: Point,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<WaypointKind>,
}

impl Waypoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            position: Point::new(x, y),
            id: None,
            kind: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_kind(mut self, kind: WaypointKind) -> Self {
        self.kind = Some(kind);
        self
    }
}

/// A tracked radar contact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarTarget {
    /// Offset from the scope centre in reference units
    /// (scope radius = `RADAR_REFERENCE_RADIUS`).
    pub position: Point,
    /// Reported range to the contact.
    pub distance: f64,
    /// Reported bearing (degrees).
    pub bearing: f64,
    pub class: TargetClass,
    /// Reported velocity. Carried for display, not integrated.
    pub velocity: Point,
    /// Clock time of the last report (seconds on the dashboard clock).
    pub timestamp_secs: f64,
}

impl RadarTarget {
    pub fn new(position: Point, class: TargetClass) -> Self {
        Self {
            position,
            distance: position.length(),
            bearing: 0.0,
            class,
            velocity: Point::ZERO,
            timestamp_secs: 0.0,
        }
    }
}

/// Kinematic and mission state of the robot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RobotState {
    /// Current speed (km/h), never negative.
    pub speed: f64,
    pub position: Point,
    /// Direction of the most recent non-zero displacement (radians).
    pub heading: f64,
    /// Positions recorded since the last reset, oldest first.
    pub path: Vec<Point>,
    /// Pending targets; the front is the current one.
    pub waypoints: VecDeque<Waypoint>,
    pub radar_targets: Vec<RadarTarget>,
}

impl RobotState {
    /// Next waypoint the robot is heading for, if any.
    pub fn current_target(&self) -> Option<&Waypoint> {
        self.waypoints.front()
    }
}

/// Mission countdown clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    pub hours: u32,
    /// 0..=59
    pub minutes: u32,
    /// 0..=59
    pub seconds: u32,
    pub is_running: bool,
}

impl Default for TimerState {
    fn default() -> Self {
        Self::initial()
    }
}

impl TimerState {
    /// Startup value: 1:59:59, stopped.
    pub const fn initial() -> Self {
        Self {
            hours: TIMER_START_HOURS,
            minutes: TIMER_START_MINUTES,
            seconds: TIMER_START_SECONDS,
            is_running: false,
        }
    }

    pub const fn zero() -> Self {
        Self {
            hours: 0,
            minutes: 0,
            seconds: 0,
            is_running: false,
        }
    }

    pub fn phase(&self) -> TimerPhase {
        if self.is_running {
            TimerPhase::Running
        } else {
            TimerPhase::Stopped
        }
    }

    /// Total remaining seconds.
    pub fn remaining_secs(&self) -> u64 {
        self.hours as u64 * 3600 + self.minutes as u64 * 60 + self.seconds as u64
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining_secs() == 0
    }

    /// Status readout form, e.g. `1:59:59` or `0:07:03`.
    pub fn display(&self) -> String {
        format!("{}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

/// Read-only status readout for collaborators (numeric panels, logs).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusView {
    pub speed: f64,
    pub position: Point,
    pub heading: f64,
    pub next_waypoint: Option<Point>,
    pub waypoints_remaining: usize,
    pub path_len: usize,
    pub radar_contacts: usize,
    pub timer: TimerState,
    pub timer_display: String,
}

impl StatusView {
    pub fn new(robot: &RobotState, timer: TimerState) -> Self {
        Self {
            speed: robot.speed,
            position: robot.position,
            heading: robot.heading,
            next_waypoint: robot.current_target().map(|wp| wp.position),
            waypoints_remaining: robot.waypoints.len(),
            path_len: robot.path.len(),
            radar_contacts: robot.radar_targets.len(),
            timer,
            timer_display: timer.display(),
        }
    }
}

/// Waypoint queue loaded at startup.
pub fn default_waypoints() -> VecDeque<Waypoint> {
    VecDeque::from(vec![
        Waypoint::new(300.0, 150.0)
            .with_id("wp1")
            .with_kind(WaypointKind::Navigation),
        Waypoint::new(500.0, 180.0)
            .with_id("wp2")
            .with_kind(WaypointKind::Checkpoint),
        Waypoint::new(450.0, 280.0)
            .with_id("wp3")
            .with_kind(WaypointKind::Navigation),
        Waypoint::new(350.0, 250.0)
            .with_id("wp4")
            .with_kind(WaypointKind::Destination),
    ])
}

/// Radar contacts loaded at startup. Offsets are relative to the centre of
/// a 200 x 200 reference scope.
pub fn default_radar_targets() -> Vec<RadarTarget> {
    vec![
        RadarTarget {
            position: Point::new(-20.0, -40.0),
            distance: 45.0,
            bearing: 75.0,
            class: TargetClass::Unknown,
            velocity: Point::ZERO,
            timestamp_secs: 0.0,
        },
        RadarTarget {
            position: Point::new(20.0, -10.0),
            distance: 65.0,
            bearing: 120.0,
            class: TargetClass::Friendly,
            velocity: Point::new(-1.0, 0.0),
            timestamp_secs: 0.0,
        },
        RadarTarget {
            position: Point::new(-40.0, 20.0),
            distance: 38.0,
            bearing: 45.0,
            class: TargetClass::Neutral,
            velocity: Point::new(0.0, 1.0),
            timestamp_secs: 0.0,
        },
    ]
}

/// Robot start position as a point.
pub fn start_position() -> Point {
    Point::from_array(START_POSITION)
}

//! Simulation state store: the single owner of robot and timer state.
//!
//! Collaborator mutations go through the methods here, which refuse
//! anything that would corrupt later ticks (non-finite points, an
//! overfull contact list). The stepper and timer get crate-private
//! mutable access and are trusted to keep their own invariants.

use dashboard_core::config::DashboardConfig;
use dashboard_core::error::StoreError;
use dashboard_core::state::{
    default_radar_targets, default_waypoints, RadarTarget, RobotState, StatusView, TimerState,
    Waypoint,
};
use dashboard_core::types::{is_finite_point, Point};

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationStore {
    robot: RobotState,
    timer: TimerState,
    start_position: Point,
    min_speed: f64,
    max_speed: f64,
    max_targets: usize,
}

impl SimulationStore {
    /// Startup state: default route, default contacts, timer at 1:59:59.
    pub fn new(config: &DashboardConfig) -> Self {
        let robot = RobotState {
            speed: config.robot.default_speed,
            position: config.robot.start_position,
            heading: 0.0,
            path: Vec::new(),
            waypoints: default_waypoints(),
            radar_targets: default_radar_targets(),
        };
        Self {
            robot,
            timer: TimerState::initial(),
            start_position: config.robot.start_position,
            min_speed: config.robot.min_speed,
            max_speed: config.robot.max_speed,
            max_targets: config.radar.max_targets,
        }
    }

    pub fn robot(&self) -> &RobotState {
        &self.robot
    }

    pub fn timer(&self) -> TimerState {
        self.timer
    }

    pub fn status(&self) -> StatusView {
        StatusView::new(&self.robot, self.timer)
    }

    pub(crate) fn robot_mut(&mut self) -> &mut RobotState {
        &mut self.robot
    }

    pub(crate) fn timer_mut(&mut self) -> &mut TimerState {
        &mut self.timer
    }

    /// Restore position, path and timer to their startup values.
    /// Waypoints, contacts, speed and heading are kept.
    pub fn reset(&mut self) {
        self.robot.position = self.start_position;
        self.robot.path.clear();
        self.timer = TimerState::initial();
    }

    // --- Waypoints ---

    pub fn enqueue_waypoint(&mut self, waypoint: Waypoint) -> Result<(), StoreError> {
        validate_waypoint(&waypoint)?;
        self.robot.waypoints.push_back(waypoint);
        Ok(())
    }

    /// All-or-nothing: one bad point leaves the current queue in place.
    pub fn replace_waypoints(&mut self, waypoints: Vec<Waypoint>) -> Result<(), StoreError> {
        waypoints.iter().try_for_each(validate_waypoint)?;
        self.robot.waypoints = waypoints.into();
        Ok(())
    }

    pub fn clear_waypoints(&mut self) {
        self.robot.waypoints.clear();
    }

    // --- Radar contacts ---

    pub fn add_radar_target(&mut self, target: RadarTarget) -> Result<(), StoreError> {
        validate_target(&target)?;
        if self.robot.radar_targets.len() >= self.max_targets {
            return Err(StoreError::TargetLimit {
                limit: self.max_targets,
            });
        }
        self.robot.radar_targets.push(target);
        Ok(())
    }

    pub fn replace_radar_targets(&mut self, targets: Vec<RadarTarget>) -> Result<(), StoreError> {
        targets.iter().try_for_each(validate_target)?;
        if targets.len() > self.max_targets {
            return Err(StoreError::TargetLimit {
                limit: self.max_targets,
            });
        }
        self.robot.radar_targets = targets;
        Ok(())
    }

    pub fn clear_radar_targets(&mut self) {
        self.robot.radar_targets.clear();
    }

    /// Drop contacts last reported more than `max_age_secs` before `now_secs`.
    /// Returns how many were removed.
    pub fn prune_stale_targets(&mut self, now_secs: f64, max_age_secs: f64) -> usize {
        let before = self.robot.radar_targets.len();
        self.robot
            .radar_targets
            .retain(|t| !(now_secs - t.timestamp_secs > max_age_secs));
        before - self.robot.radar_targets.len()
    }

    // --- Robot ---

    /// Set the speed, clamped into the configured range. Returns the value
    /// actually stored.
    pub fn set_speed(&mut self, speed: f64) -> Result<f64, StoreError> {
        if !speed.is_finite() {
            return Err(StoreError::NonFiniteSpeed(speed));
        }
        self.robot.speed = speed.clamp(self.min_speed, self.max_speed);
        Ok(self.robot.speed)
    }
}

fn validate_waypoint(waypoint: &Waypoint) -> Result<(), StoreError> {
    if is_finite_point(waypoint.position) {
        Ok(())
    } else {
        Err(StoreError::NonFiniteWaypoint {
            x: waypoint.position.x,
            y: waypoint.position.y,
        })
    }
}

fn validate_target(target: &RadarTarget) -> Result<(), StoreError> {
    let field = if !is_finite_point(target.position) {
        "position"
    } else if !is_finite_point(target.velocity) {
        "velocity"
    } else if !target.distance.is_finite() {
        "distance"
    } else if !target.bearing.is_finite() {
        "bearing"
    } else if !target.timestamp_secs.is_finite() {
        "timestamp_secs"
    } else {
        return Ok(());
    };
    Err(StoreError::NonFiniteTarget { field })
}

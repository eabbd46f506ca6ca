//! Waypoint-following kinematics.
//!
//! Each call either moves the robot one fixed step toward the head of the
//! queue or, if it is already within tolerance, consumes that waypoint.
//! There is no deceleration and no overshoot correction.

use dashboard_core::config::MissionConfig;
use dashboard_core::state::{RobotState, Waypoint};

/// What one stepper call did.
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    /// Queue empty; robot holds position and heading.
    Idle,
    /// Moved one step and recorded the new position.
    Advanced,
    /// Head of the queue was within tolerance and has been removed.
    Arrived(Waypoint),
}

/// Advance the robot by one frame.
pub fn run(robot: &mut RobotState, mission: &MissionConfig) -> StepOutcome {
    let Some(target) = robot.waypoints.front() else {
        return StepOutcome::Idle;
    };

    let delta = target.position - robot.position;
    let distance = delta.length();

    // Zero distance must arrive before the delta is normalised.
    if distance <= mission.waypoint_tolerance || distance == 0.0 || !distance.is_finite() {
        return match robot.waypoints.pop_front() {
            Some(reached) => StepOutcome::Arrived(reached),
            None => StepOutcome::Idle,
        };
    }

    let direction = delta / distance;
    robot.position += direction * mission.step_length;
    robot.path.push(robot.position);
    robot.heading = delta.y.atan2(delta.x);
    StepOutcome::Advanced
}

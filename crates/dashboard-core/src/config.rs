//! Injectable dashboard configuration.
//!
//! Every tunable the simulation and renderers read lives here. Sections
//! deserialize with `#[serde(default)]`, so a config file only needs the
//! values it overrides.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::ConfigError;
use crate::state::start_position;
use crate::types::Point;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub robot: RobotConfig,
    pub mission: MissionConfig,
    pub gauge: GaugeConfig,
    pub radar: RadarConfig,
    pub schedule: ScheduleConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RobotConfig {
    /// Full-scale speed (km/h).
    pub max_speed: f64,
    pub min_speed: f64,
    /// Speed at startup.
    pub default_speed: f64,
    pub start_position: Point,
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self {
            max_speed: MAX_SPEED,
            min_speed: MIN_SPEED,
            default_speed: DEFAULT_SPEED,
            start_position: start_position(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MissionConfig {
    pub waypoint_tolerance: f64,
    pub step_length: f64,
}

impl Default for MissionConfig {
    fn default() -> Self {
        Self {
            waypoint_tolerance: WAYPOINT_TOLERANCE,
            step_length: STEP_LENGTH,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaugeConfig {
    /// Angle of the zero end of the dial (radians).
    pub start_angle: f64,
    /// Sweep at full scale (radians).
    pub span: f64,
    pub major_ticks: u32,
    /// Short ticks between each pair of major ticks.
    pub minor_ticks: u32,
    pub medium_threshold: f64,
    pub high_threshold: f64,
}

impl Default for GaugeConfig {
    fn default() -> Self {
        Self {
            start_angle: GAUGE_START_ANGLE,
            span: GAUGE_SPAN,
            major_ticks: GAUGE_MAJOR_TICKS,
            minor_ticks: GAUGE_MINOR_TICKS,
            medium_threshold: GAUGE_MEDIUM_THRESHOLD,
            high_threshold: GAUGE_HIGH_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RadarConfig {
    pub rotation_period_secs: f64,
    pub pulse_period_secs: f64,
    pub wedge_width: f64,
    pub max_targets: usize,
    /// Default age for stale-contact pruning. Nothing prunes automatically.
    pub target_timeout_secs: f64,
}

impl Default for RadarConfig {
    fn default() -> Self {
        Self {
            rotation_period_secs: RADAR_ROTATION_PERIOD_SECS,
            pulse_period_secs: RADAR_PULSE_PERIOD_SECS,
            wedge_width: RADAR_WEDGE_WIDTH,
            max_targets: RADAR_MAX_TARGETS,
            target_timeout_secs: RADAR_TARGET_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    pub timer_interval_secs: f64,
    pub frame_interval_secs: f64,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            timer_interval_secs: TIMER_INTERVAL_SECS,
            frame_interval_secs: FRAME_INTERVAL_SECS,
        }
    }
}

impl ScheduleConfig {
    /// Falls back to the default period if the value is not a valid duration.
    pub fn timer_interval(&self) -> Duration {
        interval(self.timer_interval_secs, TIMER_INTERVAL_SECS)
    }

    pub fn frame_interval(&self) -> Duration {
        interval(self.frame_interval_secs, FRAME_INTERVAL_SECS)
    }
}

fn interval(secs: f64, fallback_secs: f64) -> Duration {
    Duration::try_from_secs_f64(secs)
        .ok()
        .filter(|d| !d.is_zero())
        .unwrap_or_else(|| Duration::from_secs_f64(fallback_secs))
}

fn valid_interval(secs: f64) -> bool {
    secs.is_finite()
        && secs > 0.0
        && secs <= MAX_TASK_INTERVAL_SECS
        && Duration::try_from_secs_f64(secs).is_ok_and(|d| !d.is_zero())
}

impl DashboardConfig {
    /// Parse and validate a JSON config document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: DashboardConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Check every value the simulation divides by or iterates over.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let robot = &self.robot;
        if !(robot.max_speed.is_finite() && robot.max_speed > 0.0) {
            return Err(ConfigError::invalid("robot.max_speed", "must be positive"));
        }
        if !(robot.min_speed.is_finite()
            && robot.min_speed >= 0.0
            && robot.min_speed < robot.max_speed)
        {
            return Err(ConfigError::invalid(
                "robot.min_speed",
                "must be in [0, max_speed)",
            ));
        }
        if !(robot.default_speed >= robot.min_speed && robot.default_speed <= robot.max_speed) {
            return Err(ConfigError::invalid(
                "robot.default_speed",
                "must be in [min_speed, max_speed]",
            ));
        }
        if !robot.start_position.is_finite() {
            return Err(ConfigError::invalid("robot.start_position", "must be finite"));
        }

        let mission = &self.mission;
        if !(mission.waypoint_tolerance.is_finite() && mission.waypoint_tolerance > 0.0) {
            return Err(ConfigError::invalid(
                "mission.waypoint_tolerance",
                "must be positive",
            ));
        }
        if !(mission.step_length.is_finite() && mission.step_length > 0.0) {
            return Err(ConfigError::invalid("mission.step_length", "must be positive"));
        }
        // A longer step can hop across the arrival circle forever.
        if mission.step_length > 2.0 * mission.waypoint_tolerance {
            return Err(ConfigError::invalid(
                "mission.step_length",
                "must not exceed twice the waypoint tolerance",
            ));
        }

        let gauge = &self.gauge;
        if !gauge.start_angle.is_finite() {
            return Err(ConfigError::invalid("gauge.start_angle", "must be finite"));
        }
        if !(gauge.span.is_finite() && gauge.span > 0.0) {
            return Err(ConfigError::invalid("gauge.span", "must be positive"));
        }
        if gauge.major_ticks == 0 || gauge.major_ticks > GAUGE_MAX_TICKS {
            return Err(ConfigError::invalid(
                "gauge.major_ticks",
                format!("must be in 1..={GAUGE_MAX_TICKS}"),
            ));
        }
        if gauge.minor_ticks > GAUGE_MAX_TICKS {
            return Err(ConfigError::invalid(
                "gauge.minor_ticks",
                format!("must not exceed {GAUGE_MAX_TICKS}"),
            ));
        }
        if gauge.medium_threshold > gauge.high_threshold {
            return Err(ConfigError::invalid(
                "gauge.medium_threshold",
                "must not exceed high_threshold",
            ));
        }

        let radar = &self.radar;
        if !(radar.rotation_period_secs.is_finite() && radar.rotation_period_secs > 0.0) {
            return Err(ConfigError::invalid(
                "radar.rotation_period_secs",
                "must be positive",
            ));
        }
        if !(radar.pulse_period_secs.is_finite() && radar.pulse_period_secs > 0.0) {
            return Err(ConfigError::invalid(
                "radar.pulse_period_secs",
                "must be positive",
            ));
        }
        if !(radar.wedge_width.is_finite() && radar.wedge_width > 0.0) {
            return Err(ConfigError::invalid("radar.wedge_width", "must be positive"));
        }
        if radar.max_targets == 0 {
            return Err(ConfigError::invalid("radar.max_targets", "must be at least 1"));
        }
        if !(radar.target_timeout_secs.is_finite() && radar.target_timeout_secs >= 0.0) {
            return Err(ConfigError::invalid(
                "radar.target_timeout_secs",
                "must be non-negative",
            ));
        }

        let schedule = &self.schedule;
        if !valid_interval(schedule.timer_interval_secs) {
            return Err(ConfigError::invalid(
                "schedule.timer_interval_secs",
                format!("must be positive and at most {MAX_TASK_INTERVAL_SECS} s"),
            ));
        }
        if !valid_interval(schedule.frame_interval_secs) {
            return Err(ConfigError::invalid(
                "schedule.frame_interval_secs",
                format!("must be positive and at most {MAX_TASK_INTERVAL_SECS} s"),
            ));
        }

        Ok(())
    }
}

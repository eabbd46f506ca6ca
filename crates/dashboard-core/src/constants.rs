//! Dashboard defaults and tuning parameters.
//!
//! These seed `DashboardConfig::default()` and the startup state of the
//! simulation store. Runtime code reads the config, not these directly.

use std::f64::consts::PI;

// --- Robot ---

/// Full-scale speed of the gauge (km/h).
pub const MAX_SPEED: f64 = 40.0;

/// Lowest commandable speed (km/h).
pub const MIN_SPEED: f64 = 0.0;

/// Speed shown at startup (km/h).
pub const DEFAULT_SPEED: f64 = 14.0;

/// Robot start position on the facility map.
pub const START_POSITION: [f64; 2] = [400.0, 200.0];

// --- Mission ---

/// Distance below which a waypoint counts as reached.
pub const WAYPOINT_TOLERANCE: f64 = 5.0;

/// Distance travelled per frame-task invocation.
pub const STEP_LENGTH: f64 = 2.0;

/// Mission countdown at startup and after reset: 1:59:59.
pub const TIMER_START_HOURS: u32 = 1;
pub const TIMER_START_MINUTES: u32 = 59;
pub const TIMER_START_SECONDS: u32 = 59;

// --- Speed gauge ---

/// Angle of the zero-speed end of the dial (radians, canvas convention).
pub const GAUGE_START_ANGLE: f64 = 0.75 * PI;

/// Angular span of the dial at full scale.
pub const GAUGE_SPAN: f64 = 1.5 * PI;

pub const GAUGE_MAJOR_TICKS: u32 = 8;
pub const GAUGE_MINOR_TICKS: u32 = 4;

/// Upper bound for both major and minor tick counts.
pub const GAUGE_MAX_TICKS: u32 = 100;

/// Readout switches to the medium colour at this speed (km/h).
pub const GAUGE_MEDIUM_THRESHOLD: f64 = 20.0;

/// Readout switches to the high colour at this speed (km/h).
pub const GAUGE_HIGH_THRESHOLD: f64 = 30.0;

// --- Radar scope ---

/// One full sweep rotation (seconds).
pub const RADAR_ROTATION_PERIOD_SECS: f64 = 2.0;

/// Period of the target pulse ring (seconds).
pub const RADAR_PULSE_PERIOD_SECS: f64 = 0.4;

/// Angular width of the sweep wedge.
pub const RADAR_WEDGE_WIDTH: f64 = PI / 3.0;

/// Maximum number of tracked contacts.
pub const RADAR_MAX_TARGETS: usize = 10;

/// Default age after which a contact counts as stale (s).
pub const RADAR_TARGET_TIMEOUT_SECS: f64 = 5.0;

/// Scope radius that target offsets are expressed against.
pub const RADAR_REFERENCE_RADIUS: f64 = 80.0;

/// Spacing of the range rings in reference units.
pub const RADAR_RING_SPACING: f64 = 20.0;

// --- Scheduling ---

/// Period of the mission timer task (seconds).
pub const TIMER_INTERVAL_SECS: f64 = 1.0;

/// Period of the frame task in the headless host (seconds).
pub const FRAME_INTERVAL_SECS: f64 = 1.0 / 60.0;

/// Longest accepted period for either scheduled task (seconds).
pub const MAX_TASK_INTERVAL_SECS: f64 = 3600.0;

// --- Facility map ---

/// Pixel block size of the map's pixelated style.
pub const MAP_BLOCK_SIZE: f64 = 8.0;

/// Thickness of the outer walls (three blocks).
pub const MAP_WALL_THICKNESS: f64 = MAP_BLOCK_SIZE * 3.0;

/// Probability that a map cell receives a speckle.
pub const MAP_SPECKLE_DENSITY: f64 = 0.05;

//! Radar scope renderer: range rings, rotating sweep and pulsing contacts.
//!
//! Sweep and pulse are pure functions of clock time. Phases are computed on
//! whole nanoseconds so that `t` and `t + period` land on the same angle.

use std::f64::consts::TAU;
use std::time::Duration;

use dashboard_core::config::RadarConfig;
use dashboard_core::constants::{RADAR_REFERENCE_RADIUS, RADAR_RING_SPACING};
use dashboard_core::state::RadarTarget;
use dashboard_core::types::{is_finite_point, Point};

use crate::clock::Clock;
use crate::gauge::DialGeometry;
use crate::palette;
use crate::surface::{GradientStop, Paint, Stroke, Surface};

const GRID_WIDTH: f64 = 2.0;
const TARGET_DOT_RADIUS: f64 = 4.0;
const PULSE_AMPLITUDE: f64 = 2.0;
/// Alpha of the sweep wedge at the scope centre (0.3 opacity).
const SWEEP_ALPHA: u8 = 77;

/// Fraction of `period` elapsed at `t`, in `[0, 1)`.
fn phase(t: Duration, period: Duration) -> f64 {
    let period_nanos = period.as_nanos();
    if period_nanos == 0 {
        return 0.0;
    }
    (t.as_nanos() % period_nanos) as f64 / period_nanos as f64
}

/// Config periods are validated upstream; a bad one freezes the animation.
fn period(secs: f64) -> Duration {
    Duration::try_from_secs_f64(secs).unwrap_or(Duration::ZERO)
}

/// Leading edge of the sweep wedge at time `t`.
pub fn sweep_angle(t: Duration, rotation_period: Duration) -> f64 {
    phase(t, rotation_period) * TAU
}

/// Radius of a target's pulse ring at time `t`, in reference units.
pub fn pulse_radius(t: Duration, pulse_period: Duration) -> f64 {
    TARGET_DOT_RADIUS + PULSE_AMPLITUDE * (phase(t, pulse_period) * TAU).sin()
}

/// Where a target lands on the surface, or `None` if it is off the scope.
pub fn target_position(target: &RadarTarget, dial: &DialGeometry) -> Option<Point> {
    if !is_finite_point(target.position) || target.position.length() > RADAR_REFERENCE_RADIUS {
        return None;
    }
    Some(dial.center + target.position * dial.scale())
}

pub fn render(
    targets: &[RadarTarget],
    config: &RadarConfig,
    clock: &dyn Clock,
    surface: &mut dyn Surface,
) {
    let size = surface.size();
    if size.is_empty() {
        return;
    }

    let dial = DialGeometry::for_size(size);
    let scale = dial.scale();
    let now = clock.now();

    surface.clear();
    draw_grid(&dial, surface);

    let rotation_period = period(config.rotation_period_secs);
    let angle = sweep_angle(now, rotation_period);
    let wedge = Paint::Radial {
        center: dial.center,
        radius: dial.radius,
        stops: vec![
            GradientStop::new(0.0, palette::RED.with_alpha(SWEEP_ALPHA)),
            GradientStop::new(1.0, palette::RED.with_alpha(0)),
        ],
    };
    surface.fill_sector(dial.center, dial.radius, angle, angle + config.wedge_width, &wedge);

    let pulse = pulse_radius(now, period(config.pulse_period_secs)) * scale;
    for target in targets {
        let Some(at) = target_position(target, &dial) else {
            continue;
        };
        let color = palette::target_color(target.class);
        surface.fill_circle(at, TARGET_DOT_RADIUS * scale, &color.into());
        surface.stroke_arc(at, pulse, 0.0, TAU, &Stroke::new(color, 1.0));
    }
}

fn draw_grid(dial: &DialGeometry, surface: &mut dyn Surface) {
    let scale = dial.scale();
    let stroke = Stroke::new(palette::SURFACE, GRID_WIDTH);

    let rings = (RADAR_REFERENCE_RADIUS / RADAR_RING_SPACING).floor() as u32;
    for k in 1..=rings {
        let r = k as f64 * RADAR_RING_SPACING * scale;
        surface.stroke_arc(dial.center, r, 0.0, TAU, &stroke);
    }

    let c = dial.center;
    let r = dial.radius;
    surface.stroke_polyline(&[c - Point::new(r, 0.0), c + Point::new(r, 0.0)], &stroke);
    surface.stroke_polyline(&[c - Point::new(0.0, r), c + Point::new(0.0, r)], &stroke);
}

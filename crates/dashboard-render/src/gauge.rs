//! Speed gauge renderer.
//!
//! The dial runs clockwise from `start_angle` through `span` radians.
//! Speed is clamped into `[0, max_speed]` before any angle is derived,
//! so an out-of-range reading pins the needle at full scale.

use dashboard_core::config::GaugeConfig;
use dashboard_core::enums::SpeedBand;
use dashboard_core::types::Point;

use crate::palette;
use crate::surface::{Font, GradientStop, Paint, Stroke, Surface, SurfaceSize};
use crate::{DIAL_RADIUS_FRACTION, DIAL_REFERENCE_RADIUS};

const ARC_WIDTH: f64 = 8.0;
const MAJOR_TICK_OUTER: f64 = 15.0;
const MAJOR_TICK_INNER: f64 = 25.0;
const MINOR_TICK_INNER: f64 = 20.0;
const LABEL_INSET: f64 = 35.0;
const READOUT_FONT: f64 = 28.0;
const UNIT_FONT: f64 = 14.0;
const LABEL_FONT: f64 = 12.0;

pub const SPEED_UNIT: &str = "KM/h";

/// Angular extent of the foreground arc for `speed`.
pub fn sweep_angle(speed: f64, max_speed: f64, span: f64) -> f64 {
    if !(max_speed.is_finite() && max_speed > 0.0) {
        return 0.0;
    }
    let clamped = if speed.is_finite() {
        speed.clamp(0.0, max_speed)
    } else {
        0.0
    };
    clamped / max_speed * span
}

pub fn speed_band(speed: f64, config: &GaugeConfig) -> SpeedBand {
    if speed >= config.high_threshold {
        SpeedBand::High
    } else if speed >= config.medium_threshold {
        SpeedBand::Medium
    } else {
        SpeedBand::Low
    }
}

/// Centre and radius of the dial on a surface of `size`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DialGeometry {
    pub center: Point,
    pub radius: f64,
}

impl DialGeometry {
    pub fn for_size(size: SurfaceSize) -> Self {
        Self {
            center: size.center(),
            radius: size.min_side() * DIAL_RADIUS_FRACTION,
        }
    }

    /// Multiplier from reference artwork units to pixels.
    pub fn scale(&self) -> f64 {
        self.radius / DIAL_REFERENCE_RADIUS
    }

    /// Point at `angle` on a circle `inset` reference units inside the rim.
    pub fn point_at(&self, angle: f64, inset: f64) -> Point {
        self.center + Point::from_angle(angle) * (self.radius - inset * self.scale())
    }
}

/// Readout text: whole numbers without decimals, otherwise one decimal.
pub fn format_speed(speed: f64) -> String {
    if (speed - speed.round()).abs() < 0.05 {
        format!("{}", speed.round() as i64)
    } else {
        format!("{speed:.1}")
    }
}

pub fn render(speed: f64, max_speed: f64, config: &GaugeConfig, surface: &mut dyn Surface) {
    let size = surface.size();
    if size.is_empty() {
        return;
    }

    let dial = DialGeometry::for_size(size);
    let scale = dial.scale();
    let start = config.start_angle;

    surface.clear();

    // Background track across the full range.
    surface.stroke_arc(
        dial.center,
        dial.radius,
        start,
        start + config.span,
        &Stroke::new(palette::SURFACE, ARC_WIDTH * scale),
    );

    let sweep = sweep_angle(speed, max_speed, config.span);
    if sweep > 0.0 {
        let gradient = Paint::Linear {
            from: Point::new(0.0, 0.0),
            to: Point::new(size.width, 0.0),
            stops: vec![
                GradientStop::new(0.0, palette::GREEN),
                GradientStop::new(0.5, palette::AMBER),
                GradientStop::new(1.0, palette::RED),
            ],
        };
        surface.stroke_arc(
            dial.center,
            dial.radius,
            start,
            start + sweep,
            &Stroke::new(gradient, ARC_WIDTH * scale),
        );
    }

    draw_ticks(&dial, max_speed, config, surface);

    let shown = if speed.is_finite() { speed.max(0.0) } else { 0.0 };
    let readout_color = palette::speed_color(speed_band(shown, config));
    surface.fill_text(
        &format_speed(shown),
        dial.center + Point::new(0.0, 5.0 * scale),
        Font::bold(READOUT_FONT * scale),
        readout_color,
    );
    surface.fill_text(
        SPEED_UNIT,
        dial.center + Point::new(0.0, 25.0 * scale),
        Font::regular(UNIT_FONT * scale),
        palette::TEXT,
    );
}

fn draw_ticks(dial: &DialGeometry, max_speed: f64, config: &GaugeConfig, surface: &mut dyn Surface) {
    let scale = dial.scale();
    let majors = config.major_ticks.max(1);
    let major_stroke = Stroke::new(palette::TICK, 2.0 * scale);
    let minor_stroke = Stroke::new(palette::TICK, 1.0 * scale);
    let angle_at = |fraction: f64| config.start_angle + fraction * config.span;

    for i in 0..=majors {
        let fraction = i as f64 / majors as f64;
        let angle = angle_at(fraction);
        surface.stroke_polyline(
            &[
                dial.point_at(angle, MAJOR_TICK_OUTER),
                dial.point_at(angle, MAJOR_TICK_INNER),
            ],
            &major_stroke,
        );
        let value = fraction * max_speed;
        surface.fill_text(
            &format!("{}", value.round() as i64),
            dial.point_at(angle, LABEL_INSET),
            Font::regular(LABEL_FONT * scale),
            palette::TICK,
        );

        if i == majors {
            break;
        }
        let subdivisions = config.minor_ticks.saturating_add(1);
        for j in 1..subdivisions {
            let minor_fraction = (i as f64 + j as f64 / subdivisions as f64) / majors as f64;
            let angle = angle_at(minor_fraction);
            surface.stroke_polyline(
                &[
                    dial.point_at(angle, MAJOR_TICK_OUTER),
                    dial.point_at(angle, MINOR_TICK_INNER),
                ],
                &minor_stroke,
            );
        }
    }
}

//! Dashboard colours.

use dashboard_core::enums::{SpeedBand, TargetClass};

use crate::surface::Color;

pub const FLOOR: Color = Color::rgb(0x2a, 0x2a, 0x2a);
pub const WALL: Color = Color::rgb(0x1a, 0x1a, 0x1a);
pub const SPECKLE: Color = Color::rgb(0x33, 0x33, 0x33);
pub const SURFACE: Color = Color::rgb(0x33, 0x33, 0x33);
pub const TICK: Color = Color::rgb(0x66, 0x66, 0x66);
pub const TEXT: Color = Color::rgb(0xff, 0xff, 0xff);

pub const GREEN: Color = Color::rgb(0x27, 0xae, 0x60);
pub const AMBER: Color = Color::rgb(0xf3, 0x9c, 0x12);
pub const RED: Color = Color::rgb(0xe7, 0x4c, 0x3c);

pub const PATH: Color = GREEN;
pub const PLANNED_PATH: Color = RED;
pub const WAYPOINT: Color = RED;
pub const ROBOT_BODY: Color = SURFACE;
pub const ROBOT_CENTER: Color = RED;
pub const HEADING: Color = TEXT;

pub fn target_color(class: TargetClass) -> Color {
    match class {
        TargetClass::Unknown | TargetClass::Hostile => RED,
        TargetClass::Friendly => GREEN,
        TargetClass::Neutral => AMBER,
    }
}

pub fn speed_color(band: SpeedBand) -> Color {
    match band {
        SpeedBand::Low => GREEN,
        SpeedBand::Medium => AMBER,
        SpeedBand::High => RED,
    }
}

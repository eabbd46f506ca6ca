//! Facility map renderer: layout, travelled path, planned route, robot.

use dashboard_core::constants::MAP_SPECKLE_DENSITY;
use dashboard_core::state::RobotState;
use dashboard_core::types::{Point, Rect};

use crate::layout::FacilityLayout;
use crate::noise::NoiseSource;
use crate::palette;
use crate::surface::{Paint, Stroke, Surface, SurfaceSize};

const PATH_WIDTH: f64 = 3.0;
const PLANNED_DASH: f64 = 5.0;
const WAYPOINT_OUTER_RADIUS: f64 = 15.0;
const WAYPOINT_INNER_RADIUS: f64 = 8.0;
const ROBOT_BODY_SIZE: f64 = 16.0;
const ROBOT_CENTER_SIZE: f64 = 6.0;
const HEADING_LENGTH: f64 = 12.0;

/// Draw one frame of the map. The speckle layer consumes `noise`; nothing
/// else does, and no state is modified.
pub fn render(
    robot: &RobotState,
    layout: &FacilityLayout,
    noise: &mut dyn NoiseSource,
    surface: &mut dyn Surface,
) {
    let size = surface.size();
    if size.is_empty() {
        return;
    }

    surface.clear();
    surface.fill_rect(size.bounds(), &palette::FLOOR.into());
    draw_layout(layout, size, surface);
    draw_speckle(layout.block_size, size, noise, surface);
    draw_path(&robot.path, surface);
    draw_planned_path(robot, surface);
    draw_waypoints(robot, surface);
    draw_robot(robot.position, robot.heading, surface);
}

fn draw_layout(layout: &FacilityLayout, size: SurfaceSize, surface: &mut dyn Surface) {
    let wall: Paint = palette::WALL.into();
    let rects = layout.outer_walls(size).into_iter().chain(layout.obstacles.iter().copied());
    for rect in rects {
        if let Some(visible) = rect.clamp_to(size.width, size.height) {
            surface.fill_rect(visible, &wall);
        }
    }

    for door in &layout.doors {
        let paint: Paint = if door.open {
            palette::FLOOR.into()
        } else {
            palette::WALL.into()
        };
        if let Some(visible) = door.rect.clamp_to(size.width, size.height) {
            surface.fill_rect(visible, &paint);
        }
    }
}

/// Cosmetic pixel noise: one sample per block, re-rolled every frame.
fn draw_speckle(
    block_size: f64,
    size: SurfaceSize,
    noise: &mut dyn NoiseSource,
    surface: &mut dyn Surface,
) {
    if !(block_size.is_finite() && block_size > 0.0) {
        return;
    }
    let cols = (size.width / block_size).ceil() as usize;
    let rows = (size.height / block_size).ceil() as usize;
    let paint: Paint = palette::SPECKLE.into();

    for col in 0..cols {
        for row in 0..rows {
            if noise.next_unit() < 1.0 - MAP_SPECKLE_DENSITY {
                continue;
            }
            let cell = Rect::new(
                col as f64 * block_size,
                row as f64 * block_size,
                block_size,
                block_size,
            );
            if let Some(visible) = cell.clamp_to(size.width, size.height) {
                surface.fill_rect(visible, &paint);
            }
        }
    }
}

fn draw_path(path: &[Point], surface: &mut dyn Surface) {
    if path.len() < 2 {
        return;
    }
    surface.stroke_polyline(path, &Stroke::new(palette::PATH, PATH_WIDTH));
}

fn draw_planned_path(robot: &RobotState, surface: &mut dyn Surface) {
    if robot.waypoints.is_empty() {
        return;
    }
    let points: Vec<Point> = std::iter::once(robot.position)
        .chain(robot.waypoints.iter().map(|wp| wp.position))
        .collect();
    let stroke = Stroke::new(palette::PLANNED_PATH, PATH_WIDTH).dashed(PLANNED_DASH, PLANNED_DASH);
    surface.stroke_polyline(&points, &stroke);
}

fn draw_waypoints(robot: &RobotState, surface: &mut dyn Surface) {
    let outer = Stroke::new(palette::WAYPOINT, 2.0);
    let inner = Stroke::new(palette::WAYPOINT, 1.0);
    for wp in &robot.waypoints {
        surface.stroke_arc(wp.position, WAYPOINT_OUTER_RADIUS, 0.0, std::f64::consts::TAU, &outer);
        surface.stroke_arc(wp.position, WAYPOINT_INNER_RADIUS, 0.0, std::f64::consts::TAU, &inner);
    }
}

fn draw_robot(position: Point, heading: f64, surface: &mut dyn Surface) {
    surface.fill_rect(
        Rect::centered(position, ROBOT_BODY_SIZE),
        &palette::ROBOT_BODY.into(),
    );
    surface.fill_rect(
        Rect::centered(position, ROBOT_CENTER_SIZE),
        &palette::ROBOT_CENTER.into(),
    );
    surface.stroke_polyline(
        &[position, heading_tip(position, heading)],
        &Stroke::new(palette::HEADING, 2.0),
    );
}

/// End point of the heading indicator.
pub fn heading_tip(position: Point, heading: f64) -> Point {
    position + Point::from_angle(heading) * HEADING_LENGTH
}

//! Static facility layout drawn beneath the robot.

use serde::{Deserialize, Serialize};

use dashboard_core::constants::{MAP_BLOCK_SIZE, MAP_WALL_THICKNESS};
use dashboard_core::types::Rect;

use crate::surface::SurfaceSize;

/// A doorway cut into the top wall.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Door {
    pub rect: Rect,
    pub open: bool,
}

/// Walls, obstacles and doors in layout coordinates (pixels at 1:1).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacilityLayout {
    /// Size of one block of the pixelated style.
    pub block_size: f64,
    /// Thickness of the four outer walls, which always span the surface.
    pub wall_thickness: f64,
    pub obstacles: Vec<Rect>,
    pub doors: Vec<Door>,
}

impl Default for FacilityLayout {
    fn default() -> Self {
        let b = MAP_BLOCK_SIZE;
        Self {
            block_size: b,
            wall_thickness: MAP_WALL_THICKNESS,
            obstacles: vec![
                Rect::new(100.0, 50.0, b * 8.0, b * 6.0),
                Rect::new(200.0, 150.0, b * 6.0, b * 8.0),
                Rect::new(350.0, 80.0, b * 10.0, b * 4.0),
                Rect::new(500.0, 200.0, b * 6.0, b * 6.0),
                Rect::new(150.0, 280.0, b * 12.0, b * 4.0),
            ],
            doors: vec![
                Door {
                    rect: Rect::new(200.0, 0.0, 32.0, 8.0),
                    open: true,
                },
                Door {
                    rect: Rect::new(600.0, 0.0, 32.0, 8.0),
                    open: false,
                },
            ],
        }
    }
}

impl FacilityLayout {
    /// Top, bottom, left and right walls for the given surface.
    pub fn outer_walls(&self, size: SurfaceSize) -> [Rect; 4] {
        let t = self.wall_thickness;
        [
            Rect::new(0.0, 0.0, size.width, t),
            Rect::new(0.0, size.height - t, size.width, t),
            Rect::new(0.0, 0.0, t, size.height),
            Rect::new(size.width - t, 0.0, t, size.height),
        ]
    }
}

//! Recorded dashboard frames for hosts and frontends.

use serde::{Deserialize, Serialize};

use dashboard_core::events::DashboardEvent;
use dashboard_core::state::StatusView;
use dashboard_render::surface::{DrawCommand, DrawList, Surface, SurfaceSize};

/// Mutable borrows of the three drawing surfaces for one frame task.
pub struct SurfaceSet<'a> {
    pub map: &'a mut dyn Surface,
    pub gauge: &'a mut dyn Surface,
    pub radar: &'a mut dyn Surface,
}

/// Recording surfaces owned by a headless host.
#[derive(Debug, Clone, Default)]
pub struct DashboardSurfaces {
    pub map: DrawList,
    pub gauge: DrawList,
    pub radar: DrawList,
}

impl DashboardSurfaces {
    /// The gauge and radar share one dial size.
    pub fn new(map: SurfaceSize, dial: SurfaceSize) -> Self {
        Self {
            map: DrawList::new(map.width, map.height),
            gauge: DrawList::new(dial.width, dial.height),
            radar: DrawList::new(dial.width, dial.height),
        }
    }

    /// Apply a host resize; the next frame renders at the new size.
    pub fn resize(&mut self, map: SurfaceSize, dial: SurfaceSize) {
        self.map.resize(map.width, map.height);
        self.gauge.resize(dial.width, dial.height);
        self.radar.resize(dial.width, dial.height);
    }

    pub fn as_set(&mut self) -> SurfaceSet<'_> {
        SurfaceSet {
            map: &mut self.map,
            gauge: &mut self.gauge,
            radar: &mut self.radar,
        }
    }
}

/// Everything a frontend needs to redraw after one frame task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardFrame {
    /// Frame-task invocation number (1-based).
    pub frame: u64,
    /// Clock time the frame was rendered at.
    pub time_secs: f64,
    pub status: StatusView,
    /// Events since the previous frame.
    pub events: Vec<DashboardEvent>,
    pub map: Vec<DrawCommand>,
    pub gauge: Vec<DrawCommand>,
    pub radar: Vec<DrawCommand>,
}

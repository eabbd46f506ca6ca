//! State shared between control calls and the host loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use dashboard_core::commands::MissionCommand;
use dashboard_render::surface::SurfaceSize;
use dashboard_sim::frame::DashboardFrame;

use crate::error::AppError;

/// Messages from control calls to the host loop thread.
#[derive(Debug, Clone, PartialEq)]
pub enum HostCommand {
    /// Forwarded to the controller's command queue.
    Mission(MissionCommand),
    /// New pixel sizes for the map and the two dials.
    Resize { map: SurfaceSize, dial: SurfaceSize },
    /// Stop both tasks and end the thread.
    Shutdown,
}

/// Shared application state.
///
/// `Sender` is not `Sync`, so it sits behind a `Mutex`. The latest frame is
/// shared with the loop thread for synchronous polling.
pub struct AppState {
    /// `None` until `control::start`.
    pub command_tx: Mutex<Option<mpsc::Sender<HostCommand>>>,
    /// Replaced by the loop thread after every frame task.
    pub latest_frame: Arc<Mutex<Option<DashboardFrame>>>,
    pub worker: Mutex<Option<JoinHandle<Result<(), AppError>>>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_frame: Arc::new(Mutex::new(None)),
            worker: Mutex::new(None),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}

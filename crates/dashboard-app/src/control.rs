//! Control surface for collaborators.
//!
//! These calls bridge requests from outside the loop (stdin, an embedding
//! frontend) to the host loop thread via its channel.

use dashboard_core::commands::MissionCommand;
use dashboard_render::surface::SurfaceSize;
use dashboard_sim::frame::DashboardFrame;

use crate::error::AppError;
use crate::host_loop::{self, HostOptions};
use crate::sink::FrameSink;
use crate::state::{AppState, HostCommand};

/// Spawn the host loop if it is not already running.
pub fn start(state: &AppState, options: HostOptions, sink: Option<FrameSink>) -> Result<(), AppError> {
    let mut worker = state.worker.lock()?;
    if worker.is_some() {
        return Err(AppError::AlreadyRunning);
    }

    let (cmd_tx, handle) =
        host_loop::spawn_host_loop(options, state.latest_frame.clone(), sink)?;

    *state.command_tx.lock()? = Some(cmd_tx);
    *worker = Some(handle);
    Ok(())
}

fn send(state: &AppState, command: HostCommand) -> Result<(), AppError> {
    let tx = state.command_tx.lock()?;
    match tx.as_ref() {
        Some(tx) => tx.send(command).map_err(|_| AppError::LoopStopped),
        None => Err(AppError::NotStarted),
    }
}

/// Forward a mission command; it applies before the next tick.
pub fn send_command(state: &AppState, command: MissionCommand) -> Result<(), AppError> {
    send(state, HostCommand::Mission(command))
}

pub fn resize(state: &AppState, map: SurfaceSize, dial: SurfaceSize) -> Result<(), AppError> {
    send(state, HostCommand::Resize { map, dial })
}

/// Latest published frame, if any.
pub fn get_frame(state: &AppState) -> Result<Option<DashboardFrame>, AppError> {
    let lock = state.latest_frame.lock()?;
    Ok(lock.clone())
}

/// Block until the loop ends on its own (deadline or disconnect).
pub fn wait(state: &AppState) -> Result<(), AppError> {
    let handle = state.worker.lock()?.take().ok_or(AppError::NotStarted)?;
    state.command_tx.lock()?.take();
    handle.join().map_err(|_| AppError::LoopPanicked)?
}

/// Ask the loop to stop and wait for it.
pub fn shutdown(state: &AppState) -> Result<(), AppError> {
    // A loop that already ended has dropped its receiver.
    match send(state, HostCommand::Shutdown) {
        Ok(()) | Err(AppError::LoopStopped) => {}
        Err(err) => return Err(err),
    }
    wait(state)
}

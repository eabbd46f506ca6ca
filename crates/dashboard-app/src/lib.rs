//! Headless host for the rover dashboard.
//!
//! Wires the simulation crates to a loop thread and exposes control calls
//! for collaborators. Frames can be streamed as JSON lines for a frontend.

pub mod control;
pub mod error;
pub mod host_loop;
pub mod sink;
pub mod state;

pub use dashboard_core as core;
pub use error::AppError;

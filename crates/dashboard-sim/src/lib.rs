//! Simulation engine for the rover dashboard.
//!
//! Owns the dashboard state, runs the kinematics stepper and mission
//! timer, and drives the renderers from a dual-cadence scheduler.

pub mod engine;
pub mod frame;
pub mod scheduler;
pub mod store;
pub mod systems;

pub use dashboard_core as core;
pub use engine::SimulationController;

#[cfg(test)]
mod tests;

//! Per-tick systems operating on the simulation store.
//!
//! Systems are plain functions over borrowed state. They do not own
//! anything and never fail: invalid transitions are refused in place.

pub mod kinematics;
pub mod timer;

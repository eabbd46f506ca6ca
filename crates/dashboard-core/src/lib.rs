//! Core types and definitions for the rover dashboard.
//!
//! This crate defines the vocabulary shared across all other crates:
//! robot and timer state, mission commands, events, configuration and
//! constants. It has no dependency on any rendering or runtime framework.

pub mod commands;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod state;
pub mod types;

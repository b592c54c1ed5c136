//! Kinematics shared types.
//!
//! Everything exchanged between the kinematics engine, its host and the
//! tooling lives here: joint/pose types, the kinematics config snapshot,
//! the per-cycle signal bank, capability flags, errors and the service
//! configuration sections.

pub mod config;
pub mod error;
pub mod flags;
pub mod signals;
pub mod types;

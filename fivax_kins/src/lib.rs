//! # fivax Kinematics Library
//!
//! Joint ↔ cartesian transforms for a 5-axis mill with a tilting table (A)
//! and a rotary mounted on it (B), plus the handshake that switches between
//! five-axis and trivial kinematics while motion is running.
//!
//! ## Layers
//!
//! 1. [`kinematics`]: pure forward/inverse/home math for an explicit config
//! 2. [`state::switch`]: active-config owner and change-pending/allowed handshake
//! 3. [`module`]: host entry points (`KinematicsModule`) and module registry
//! 4. [`cycle`]: periodic driver, RT setup and cycle statistics
//!
//! ## Zero-Allocation RT Path
//!
//! `forward`, `inverse` and `home` take and return plain `f64` aggregates by
//! value. The cycle runner's commit history is a fixed-capacity
//! `heapless::Deque`.

pub mod config;
pub mod cycle;
pub mod kinematics;
pub mod module;
pub mod state;

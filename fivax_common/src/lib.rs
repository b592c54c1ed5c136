//! fivax Common Library
//!
//! Shared constants, kinematics data types, the per-cycle signal bank and
//! configuration loading utilities for all fivax workspace crates.
//!
//! # Module Structure
//!
//! - [`kinematics`] - Joint/pose types, kinematics config, signals and errors
//! - [`config`] - Configuration loading traits and types
//! - [`consts`] - Workspace-wide numeric constants
//! - [`prelude`] - Common re-exports for convenience
//!
//! # Usage
//!
//! ```rust
//! use fivax_common::prelude::*;
//!
//! let config = KinematicsConfig::five_axis(12.5);
//! assert_eq!(config.mode, KinematicsMode::FiveAxis);
//! ```

pub mod config;
pub mod consts;
pub mod kinematics;
pub mod prelude;

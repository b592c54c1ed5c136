//! Prelude module for common re-exports.
//!
//! ```rust
//! use fivax_common::prelude::*;
//! ```

use std::time::Duration;

// ─── Logging ────────────────────────────────────────────────────────
pub use crate::config::LogLevel;

// ─── Configuration ──────────────────────────────────────────────────
pub use crate::config::{ConfigError, ConfigLoader, SharedConfig};
pub use crate::kinematics::config::{CycleSection, KinematicsSection, KinsConfig};

// ─── System Constants ───────────────────────────────────────────────
pub use crate::consts::{CYCLE_TIME_US, NUM_JOINTS, TOOL_Z_OFFSET_EPSILON};

// ─── Kinematics ─────────────────────────────────────────────────────
pub use crate::kinematics::error::KinematicsError;
pub use crate::kinematics::flags::{Capabilities, KinematicsFlags};
pub use crate::kinematics::signals::SignalBank;
pub use crate::kinematics::types::{Joint, JointVector, KinematicsConfig, KinematicsMode, Pose};

/// Default system cycle time as Duration.
pub const DEFAULT_CYCLE_TIME: Duration = Duration::from_micros(CYCLE_TIME_US as u64);

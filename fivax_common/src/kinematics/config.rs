//! Configuration structures for the kinematics service.
//!
//! All config types use `serde::Deserialize` for TOML loading; every section
//! and optional field falls back to a default so a minimal file is valid.

use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, SharedConfig};
use crate::consts::{CYCLE_TIME_US, CYCLE_TIME_US_MAX, CYCLE_TIME_US_MIN};

use super::types::{KinematicsConfig, KinematicsMode};

/// Name of the tilting/rotary table module.
pub const POCKETNCKINS: &str = "pocketnckins";
/// Name of the identity-only module.
pub const TRIVKINS: &str = "trivkins";

// ─── Top-Level Config ───────────────────────────────────────────────

/// Top-level service configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KinsConfig {
    #[serde(default)]
    pub shared: SharedConfig,
    #[serde(default)]
    pub kinematics: KinematicsSection,
    #[serde(default)]
    pub cycle: CycleSection,
}

impl KinsConfig {
    /// Validate every section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.shared.validate()?;
        self.kinematics.validate()?;
        self.cycle.validate()
    }
}

// ─── Kinematics Section ─────────────────────────────────────────────

/// Module selection and the initial requested mapping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KinematicsSection {
    /// Registered module name (default: `pocketnckins`).
    #[serde(default = "default_module")]
    pub module: String,
    /// Initial `mode_select` input.
    #[serde(default)]
    pub five_axis: bool,
    /// Initial `tool_z_offset` input [length units].
    #[serde(default)]
    pub tool_z_offset: f64,
}

fn default_module() -> String {
    POCKETNCKINS.to_string()
}

impl Default for KinematicsSection {
    fn default() -> Self {
        Self {
            module: default_module(),
            five_axis: false,
            tool_z_offset: 0.0,
        }
    }
}

impl KinematicsSection {
    /// Config requested by this section's initial inputs.
    pub fn requested(&self) -> KinematicsConfig {
        KinematicsConfig::new(
            KinematicsMode::from_select(self.five_axis),
            self.tool_z_offset,
        )
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.module.is_empty() {
            return Err(ConfigError::ValidationError(
                "kinematics.module cannot be empty".to_string(),
            ));
        }
        if !self.tool_z_offset.is_finite() {
            return Err(ConfigError::ValidationError(format!(
                "kinematics.tool_z_offset must be finite, got {}",
                self.tool_z_offset
            )));
        }
        Ok(())
    }
}

// ─── Cycle Section ──────────────────────────────────────────────────

/// Cycle driver timing and RT placement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CycleSection {
    /// Target cycle time in microseconds (default: 1000 = 1ms).
    #[serde(default = "default_cycle_time_us")]
    pub cycle_time_us: u32,
    /// CPU core to pin the RT thread to (default: 1).
    #[serde(default = "default_cpu_core")]
    pub cpu_core: usize,
    /// SCHED_FIFO priority (default: 80).
    #[serde(default = "default_rt_priority")]
    pub rt_priority: i32,
}

fn default_cycle_time_us() -> u32 {
    CYCLE_TIME_US
}
fn default_cpu_core() -> usize {
    1
}
fn default_rt_priority() -> i32 {
    80
}

impl Default for CycleSection {
    fn default() -> Self {
        Self {
            cycle_time_us: default_cycle_time_us(),
            cpu_core: default_cpu_core(),
            rt_priority: default_rt_priority(),
        }
    }
}

impl CycleSection {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cycle_time_us < CYCLE_TIME_US_MIN || self.cycle_time_us > CYCLE_TIME_US_MAX {
            return Err(ConfigError::ValidationError(format!(
                "cycle_time_us {} out of range [{}, {}]",
                self.cycle_time_us, CYCLE_TIME_US_MIN, CYCLE_TIME_US_MAX
            )));
        }
        if !(1..=99).contains(&self.rt_priority) {
            return Err(ConfigError::ValidationError(format!(
                "rt_priority {} out of range [1, 99]",
                self.rt_priority
            )));
        }
        Ok(())
    }
}

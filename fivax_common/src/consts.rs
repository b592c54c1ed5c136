//! System-wide constants for the fivax workspace.
//!
//! Single source of truth for numeric limits and default paths.

/// Number of machine joints: X, Y, Z linear plus A, B rotary.
pub const NUM_JOINTS: usize = 5;

/// Tool-Z-offset drift tolerance. A requested offset must differ from the
/// active one by strictly more than this to count as a change.
pub const TOOL_Z_OFFSET_EPSILON: f64 = 0.00001;

/// Default system cycle time in microseconds (1 kHz = 1000 µs).
pub const CYCLE_TIME_US: u32 = 1000;

/// Lower bound for a configured cycle time [µs].
pub const CYCLE_TIME_US_MIN: u32 = 100;

/// Upper bound for a configured cycle time [µs].
pub const CYCLE_TIME_US_MAX: u32 = 100_000;

/// Number of commit records the cycle runner keeps for diagnostics.
pub const COMMIT_HISTORY_DEPTH: usize = 16;

/// Default configuration file path.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/fivax/kins.toml";

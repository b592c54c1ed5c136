//! Named scalar signals exchanged with the host every cycle.
//!
//! The host owns the bank and hands it to the kinematics module by `&mut`
//! once per cycle; inputs are written by the host before the call, outputs
//! are read back after it.

use serde::{Deserialize, Serialize};

use super::types::{KinematicsConfig, KinematicsMode, Pose};

/// Signal names as exported to the host, prefixed by the module name.
pub mod names {
    pub const MODE_SELECT: &str = "five-axis-kinematics";
    pub const TOOL_Z_OFFSET: &str = "tool-z-offset";
    pub const CHANGE_PENDING: &str = "carte-space-changed";
    pub const CHANGE_ALLOWED: &str = "carte-space-change-ok";
    pub const POS_X: &str = "pos-x";
    pub const POS_Y: &str = "pos-y";
    pub const POS_Z: &str = "pos-z";

    /// All signal names in registration order.
    pub const ALL: [&str; 7] = [
        MODE_SELECT,
        TOOL_Z_OFFSET,
        CHANGE_PENDING,
        CHANGE_ALLOWED,
        POS_X,
        POS_Y,
        POS_Z,
    ];
}

/// Signal direction relative to the kinematics core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalDirection {
    In,
    Out,
}

/// Per-cycle signal bank.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SignalBank {
    // ── Inputs ──
    /// Requested mode: true = five-axis, false = trivial.
    pub mode_select: bool,
    /// Requested pivot-to-tip offset [length units].
    pub tool_z_offset: f64,
    /// External authorization to commit the requested config.
    pub change_allowed: bool,

    // ── Outputs ──
    /// Active config differs from the requested one.
    pub change_pending: bool,
    /// Echoed X after the latest authorized cycle.
    pub pos_x: f64,
    /// Echoed Y after the latest authorized cycle.
    pub pos_y: f64,
    /// Echoed Z (tool-tip relative) after the latest authorized cycle.
    pub pos_z: f64,
}

impl SignalBank {
    /// Bank whose inputs request `config`, gate closed, outputs zeroed.
    pub fn requesting(config: KinematicsConfig) -> Self {
        Self {
            mode_select: config.mode.is_five_axis(),
            tool_z_offset: config.tool_z_offset,
            ..Self::default()
        }
    }

    /// Config currently requested by the inputs.
    #[inline]
    pub fn requested_config(&self) -> KinematicsConfig {
        KinematicsConfig::new(
            KinematicsMode::from_select(self.mode_select),
            self.tool_z_offset,
        )
    }

    /// Write the position echo for a pose computed under `active`.
    ///
    /// Z is reported relative to the tool tip, i.e. without the active offset.
    #[inline]
    pub fn echo_position(&mut self, pose: &Pose, active: &KinematicsConfig) {
        self.pos_x = pose.x;
        self.pos_y = pose.y;
        self.pos_z = pose.z - active.tool_z_offset;
    }

    /// Echoed position as `[x, y, z]`.
    #[inline]
    pub fn echoed_position(&self) -> [f64; 3] {
        [self.pos_x, self.pos_y, self.pos_z]
    }

    /// Direction of a named signal, `None` if the name is unknown.
    pub fn direction(name: &str) -> Option<SignalDirection> {
        match name {
            names::MODE_SELECT | names::TOOL_Z_OFFSET | names::CHANGE_ALLOWED => {
                Some(SignalDirection::In)
            }
            names::CHANGE_PENDING | names::POS_X | names::POS_Y | names::POS_Z => {
                Some(SignalDirection::Out)
            }
            _ => None,
        }
    }
}

//! Tilting/rotary table module with switchable five-axis kinematics.
//!
//! Forward runs the mode-switch handshake before transforming, so a commit
//! and the transform of the same cycle both use the post-commit config.
//! Inverse never touches the handshake; it always uses the active config.

use fivax_common::kinematics::config::POCKETNCKINS;
use fivax_common::kinematics::error::KinematicsError;
use fivax_common::kinematics::flags::{Capabilities, KinematicsFlags};
use fivax_common::kinematics::signals::SignalBank;
use fivax_common::kinematics::types::{JointVector, KinematicsConfig, Pose};
use tracing::{debug, info};

use crate::kinematics;
use crate::state::switch::{ModeSwitch, SwitchOutcome};

use super::KinematicsModule;

/// Table kinematics with an owned mode switch.
#[derive(Debug, Clone, Default)]
pub struct TableKinematics {
    switch: ModeSwitch,
}

impl TableKinematics {
    /// Start in trivial mode with zero offset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a given active config.
    pub fn with_active(active: KinematicsConfig) -> Self {
        Self {
            switch: ModeSwitch::new(active),
        }
    }
}

impl KinematicsModule for TableKinematics {
    fn name(&self) -> &'static str {
        POCKETNCKINS
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::BOTH
    }

    fn active_config(&self) -> KinematicsConfig {
        self.switch.active()
    }

    fn forward(
        &mut self,
        signals: &mut SignalBank,
        joints: &JointVector,
        _flags: &mut KinematicsFlags,
    ) -> Result<Pose, KinematicsError> {
        let requested = signals.requested_config();

        match self.switch.evaluate(requested, signals.change_allowed) {
            SwitchOutcome::Pending { first: true } => {
                info!(
                    active = ?self.switch.active(),
                    requested = ?requested,
                    state = ?self.switch.state(),
                    "kinematics parameters changed, waiting for change permission"
                );
            }
            SwitchOutcome::Reverted => {
                debug!(
                    state = ?self.switch.state(),
                    "kinematics request reverted to active config"
                );
            }
            SwitchOutcome::Applied {
                previous,
                active,
                changed: true,
            } => {
                info!(
                    ?previous,
                    ?active,
                    changes = self.switch.change_count(),
                    "kinematics change permitted, config committed"
                );
            }
            _ => {}
        }
        signals.change_pending = self.switch.is_pending();

        let active = self.switch.active();
        let pose = kinematics::forward(&active, joints);

        if signals.change_allowed {
            signals.echo_position(&pose, &active);
        }

        Ok(pose)
    }

    fn inverse(
        &self,
        pose: &Pose,
        _flags: &mut KinematicsFlags,
    ) -> Result<JointVector, KinematicsError> {
        Ok(kinematics::inverse(&self.switch.active(), pose))
    }
}

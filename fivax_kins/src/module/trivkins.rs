//! Identity-only module. Ignores mode requests and never reports a pending
//! change; the position echo follows the gate like any other module.

use fivax_common::kinematics::config::TRIVKINS;
use fivax_common::kinematics::error::KinematicsError;
use fivax_common::kinematics::flags::{Capabilities, KinematicsFlags};
use fivax_common::kinematics::signals::SignalBank;
use fivax_common::kinematics::types::{JointVector, KinematicsConfig, Pose};

use crate::kinematics::trivial;

use super::KinematicsModule;

#[derive(Debug, Clone, Copy, Default)]
pub struct TrivialKinematics;

impl KinematicsModule for TrivialKinematics {
    fn name(&self) -> &'static str {
        TRIVKINS
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::BOTH
    }

    fn active_config(&self) -> KinematicsConfig {
        KinematicsConfig::trivial()
    }

    fn forward(
        &mut self,
        signals: &mut SignalBank,
        joints: &JointVector,
        _flags: &mut KinematicsFlags,
    ) -> Result<Pose, KinematicsError> {
        signals.change_pending = false;
        let pose = trivial::forward(joints);
        if signals.change_allowed {
            signals.echo_position(&pose, &KinematicsConfig::trivial());
        }
        Ok(pose)
    }

    fn inverse(
        &self,
        pose: &Pose,
        _flags: &mut KinematicsFlags,
    ) -> Result<JointVector, KinematicsError> {
        Ok(trivial::inverse(pose))
    }
}

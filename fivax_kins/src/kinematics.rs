//! Transform math root.
//!
//! Pure, allocation-free mapping between joint and cartesian coordinates for
//! an explicit [`KinematicsConfig`]. Nothing here reads shared state; the
//! caller decides which config is in effect.

pub mod direction;
pub mod five_axis;
pub mod trivial;

use fivax_common::kinematics::types::{JointVector, KinematicsConfig, KinematicsMode, Pose};

/// Joints → pose under `config`.
#[inline]
pub fn forward(config: &KinematicsConfig, joints: &JointVector) -> Pose {
    match config.mode {
        KinematicsMode::FiveAxis => five_axis::forward(config.tool_z_offset, joints),
        KinematicsMode::Trivial => trivial::forward(joints),
    }
}

/// Pose → joints under `config`. Exact inverse of [`forward`].
#[inline]
pub fn inverse(config: &KinematicsConfig, pose: &Pose) -> JointVector {
    match config.mode {
        KinematicsMode::FiveAxis => five_axis::inverse(config.tool_z_offset, pose),
        KinematicsMode::Trivial => trivial::inverse(pose),
    }
}

/// Reference pose with every joint at zero.
#[inline]
pub fn home(config: &KinematicsConfig) -> (Pose, JointVector) {
    let joints = JointVector::ZERO;
    (forward(config, &joints), joints)
}

/// Re-express `pose` from the `from` mapping in the `to` mapping, keeping the
/// machine joints where they are.
///
/// This is the commanded position that makes a mode switch motionless: turning
/// five-axis on converts the current trivial coordinates through the five-axis
/// forward map, turning it off converts back through its inverse.
#[inline]
pub fn reproject(from: &KinematicsConfig, to: &KinematicsConfig, pose: &Pose) -> Pose {
    forward(to, &inverse(from, pose))
}

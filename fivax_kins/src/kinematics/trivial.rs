//! 1:1 joint ↔ cartesian mapping.

use fivax_common::kinematics::types::{JointVector, Pose};

#[inline]
pub fn forward(joints: &JointVector) -> Pose {
    let [x, y, z, a, b] = joints.0;
    Pose { x, y, z, a, b }
}

#[inline]
pub fn inverse(pose: &Pose) -> JointVector {
    JointVector(pose.to_array())
}

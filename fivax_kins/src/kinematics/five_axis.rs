//! Tilting table (A) with a horizontal rotary (B) mounted on it.
//!
//! Forward composes a rotation about B with a compensating rotation about A,
//! referenced to the pivot point `Lz` above the tool tip. Inverse is its exact
//! algebraic inverse. Both are closed-form and constant-time.
//!
//! Inputs are not validated: NaN/Inf propagate through the algebra unchanged.

use core::f64::consts::PI;

use fivax_common::kinematics::types::{Joint, JointVector, Pose};

/// Degrees → radians, evaluated as `deg · π / 180`.
#[inline(always)]
fn deg_to_rad(deg: f64) -> f64 {
    deg * PI / 180.0
}

/// Sines and cosines of the two rotary positions.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TableAngles {
    pub ca: f64,
    pub sa: f64,
    pub cb: f64,
    pub sb: f64,
}

impl TableAngles {
    #[inline]
    pub fn new(a_deg: f64, b_deg: f64) -> Self {
        let (sa, ca) = deg_to_rad(a_deg).sin_cos();
        let (sb, cb) = deg_to_rad(b_deg).sin_cos();
        Self { ca, sa, cb, sb }
    }
}

/// Joints → pose for pivot offset `lz`.
#[inline]
pub fn forward(lz: f64, joints: &JointVector) -> Pose {
    let TableAngles { ca, sa, cb, sb } = TableAngles::new(joints[Joint::A], joints[Joint::B]);

    let jx = joints[Joint::X];
    let jy = joints[Joint::Y];
    let jz = joints[Joint::Z];

    Pose {
        x: jx * cb + jy * sb * sa - (jz - lz) * sb * ca,
        y: jy * ca + (jz - lz) * sa,
        z: jx * sb - jy * cb * sa + (jz - lz) * cb * ca + lz,
        a: joints[Joint::A],
        b: joints[Joint::B],
    }
}

/// Pose → joints for pivot offset `lz`.
#[inline]
pub fn inverse(lz: f64, pose: &Pose) -> JointVector {
    let TableAngles { ca, sa, cb, sb } = TableAngles::new(pose.a, pose.b);

    let Pose { x, y, z, a, b } = *pose;

    JointVector::new(
        x * cb + z * sb - lz * sb,
        x * sb * sa + y * ca - z * cb * sa + lz * cb * sa,
        -x * sb * ca + y * sa + z * cb * ca - lz * cb * ca + lz,
        a,
        b,
    )
}

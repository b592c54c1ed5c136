//! Direction-vector rotation between workpiece (local) and machine (global)
//! frames.
//!
//! Directions have no position, so only the rotation part of a table
//! kinematics applies; pivot offsets drop out. Used by probing and tool
//! approach code that has a vector in one frame and needs it in the other.

use fivax_common::kinematics::config::POCKETNCKINS;
use fivax_common::kinematics::types::{JointVector, Pose};

use super::five_axis;

/// Name of the B-tilt / C-rotary table kinematics.
pub const XYZBC_TRT_KINS: &str = "xyzbc-trt-kins";

/// Table geometry used to rotate directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectionModel {
    /// A tilt with B rotary (this machine).
    TableAb,
    /// B tilt with C rotary.
    TableBc,
    /// No rotary compensation.
    Identity,
}

impl DirectionModel {
    /// Pick the model from a kinematics module string such as
    /// `"xyzbc-trt-kins tool-offset=..."`. Only the first word counts;
    /// unknown modules rotate nothing.
    pub fn from_kinematics(kinematics: &str) -> Self {
        match kinematics.split_whitespace().next() {
            Some(POCKETNCKINS) => Self::TableAb,
            Some(XYZBC_TRT_KINS) => Self::TableBc,
            _ => Self::Identity,
        }
    }

    /// Workpiece frame → machine frame.
    ///
    /// `tilt`/`rotary` are in degrees: (A, B) for `TableAb`, (B, C) for
    /// `TableBc`.
    pub fn local_to_global(&self, tilt: f64, rotary: f64, dir: [f64; 3]) -> [f64; 3] {
        match self {
            Self::TableAb => {
                let [dx, dy, dz] = dir;
                let j = five_axis::inverse(0.0, &Pose::new(dx, dy, dz, tilt, rotary));
                [j.0[0], j.0[1], j.0[2]]
            }
            Self::TableBc => bc_local_to_global(tilt, rotary, dir),
            Self::Identity => dir,
        }
    }

    /// Machine frame → workpiece frame.
    pub fn global_to_local(&self, tilt: f64, rotary: f64, dir: [f64; 3]) -> [f64; 3] {
        match self {
            Self::TableAb => {
                let [dx, dy, dz] = dir;
                let p = five_axis::forward(0.0, &JointVector::new(dx, dy, dz, tilt, rotary));
                [p.x, p.y, p.z]
            }
            Self::TableBc => bc_global_to_local(tilt, rotary, dir),
            Self::Identity => dir,
        }
    }
}

fn bc_local_to_global(b_deg: f64, c_deg: f64, [dx, dy, dz]: [f64; 3]) -> [f64; 3] {
    let (sb, cb) = b_deg.to_radians().sin_cos();
    let (sc, cc) = c_deg.to_radians().sin_cos();

    let rx = cc * dx - sc * dy;
    [cb * rx + sb * dz, sc * dx + cc * dy, -sb * rx + cb * dz]
}

fn bc_global_to_local(b_deg: f64, c_deg: f64, [dx, dy, dz]: [f64; 3]) -> [f64; 3] {
    let (sb, cb) = (-b_deg).to_radians().sin_cos();
    let (sc, cc) = (-c_deg).to_radians().sin_cos();

    let rx = cb * dx + sb * dz;
    [cc * rx - sc * dy, sc * rx + cc * dy, -sb * dx + cb * dz]
}

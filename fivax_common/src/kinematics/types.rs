//! Joint, pose and kinematics configuration types.
//!
//! `JointVector` and `Pose` are plain `f64` aggregates so the transform
//! kernel can pass them by value without allocation.

use core::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};
use static_assertions::const_assert_eq;

use crate::consts::{NUM_JOINTS, TOOL_Z_OFFSET_EPSILON};

// ─── Joints ─────────────────────────────────────────────────────────

/// Joint index on the table mill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Joint {
    /// Linear X [length units].
    X = 0,
    /// Linear Y [length units].
    Y = 1,
    /// Linear Z [length units].
    Z = 2,
    /// Tilting table [deg].
    A = 3,
    /// Rotary mounted on the table [deg].
    B = 4,
}

/// Machine joint positions ordered `{X, Y, Z, A, B}`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct JointVector(pub [f64; NUM_JOINTS]);

const_assert_eq!(core::mem::size_of::<JointVector>(), 8 * NUM_JOINTS);

impl JointVector {
    /// All joints at zero.
    pub const ZERO: Self = Self([0.0; NUM_JOINTS]);

    #[inline]
    pub const fn new(x: f64, y: f64, z: f64, a: f64, b: f64) -> Self {
        Self([x, y, z, a, b])
    }

    #[inline]
    pub const fn as_array(&self) -> &[f64; NUM_JOINTS] {
        &self.0
    }
}

impl From<[f64; NUM_JOINTS]> for JointVector {
    fn from(values: [f64; NUM_JOINTS]) -> Self {
        Self(values)
    }
}

impl Index<Joint> for JointVector {
    type Output = f64;

    #[inline]
    fn index(&self, joint: Joint) -> &f64 {
        &self.0[joint as usize]
    }
}

impl IndexMut<Joint> for JointVector {
    #[inline]
    fn index_mut(&mut self, joint: Joint) -> &mut f64 {
        &mut self.0[joint as usize]
    }
}

// ─── Pose ───────────────────────────────────────────────────────────

/// Cartesian tool-center position plus the two orientation angles.
///
/// `a` and `b` mirror the rotary joints directly; they are never transformed.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(C)]
pub struct Pose {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    /// Orientation about A [deg].
    pub a: f64,
    /// Orientation about B [deg].
    pub b: f64,
}

const_assert_eq!(core::mem::size_of::<Pose>(), 40);

impl Pose {
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64, a: f64, b: f64) -> Self {
        Self { x, y, z, a, b }
    }

    /// Components in joint order, for component-wise comparison.
    #[inline]
    pub const fn to_array(&self) -> [f64; NUM_JOINTS] {
        [self.x, self.y, self.z, self.a, self.b]
    }

    /// Returns true if every component is finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.to_array().iter().all(|v| v.is_finite())
    }
}

// ─── Kinematics Config ──────────────────────────────────────────────

/// Which coordinate mapping is in effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum KinematicsMode {
    /// 1:1 joint ↔ cartesian mapping.
    #[default]
    Trivial = 0,
    /// Tilting/rotary table kinematics.
    FiveAxis = 1,
}

impl KinematicsMode {
    /// Map the `mode_select` input bit onto a mode.
    #[inline]
    pub const fn from_select(five_axis: bool) -> Self {
        if five_axis { Self::FiveAxis } else { Self::Trivial }
    }

    #[inline]
    pub const fn is_five_axis(&self) -> bool {
        matches!(self, Self::FiveAxis)
    }
}

/// One fully-defined coordinate mapping: mode plus pivot-to-tip offset.
///
/// Built fresh each cycle from the input signals; the active one is only
/// ever replaced as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct KinematicsConfig {
    pub mode: KinematicsMode,
    /// Axial offset of the rotation pivot from the tool tip [length units].
    pub tool_z_offset: f64,
}

impl KinematicsConfig {
    #[inline]
    pub const fn new(mode: KinematicsMode, tool_z_offset: f64) -> Self {
        Self {
            mode,
            tool_z_offset,
        }
    }

    #[inline]
    pub const fn trivial() -> Self {
        Self::new(KinematicsMode::Trivial, 0.0)
    }

    #[inline]
    pub const fn five_axis(tool_z_offset: f64) -> Self {
        Self::new(KinematicsMode::FiveAxis, tool_z_offset)
    }

    /// Drift test used by the mode switch: the mode differs, or the offsets
    /// are more than [`TOOL_Z_OFFSET_EPSILON`] apart.
    #[inline]
    pub fn differs_from(&self, other: &Self) -> bool {
        let delta = self.tool_z_offset - other.tool_z_offset;
        self.mode != other.mode || delta < -TOOL_Z_OFFSET_EPSILON || delta > TOOL_Z_OFFSET_EPSILON
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joint_indexing_matches_storage_order() {
        let mut j = JointVector::new(1.0, 2.0, 3.0, 4.0, 5.0);
        assert_eq!(j[Joint::X], 1.0);
        assert_eq!(j[Joint::B], 5.0);
        j[Joint::Z] = -3.0;
        assert_eq!(j.as_array()[2], -3.0);
    }

    #[test]
    fn default_config_is_trivial_zero_offset() {
        let config = KinematicsConfig::default();
        assert_eq!(config.mode, KinematicsMode::Trivial);
        assert_eq!(config.tool_z_offset, 0.0);
        assert_eq!(config, KinematicsConfig::trivial());
    }

    #[test]
    fn mode_select_mapping() {
        assert_eq!(KinematicsMode::from_select(true), KinematicsMode::FiveAxis);
        assert_eq!(KinematicsMode::from_select(false), KinematicsMode::Trivial);
    }

    #[test]
    fn differs_from_mode_change() {
        let a = KinematicsConfig::trivial();
        let b = KinematicsConfig::five_axis(0.0);
        assert!(a.differs_from(&b));
        assert!(b.differs_from(&a));
    }

    #[test]
    fn differs_from_offset_epsilon_boundary() {
        let active = KinematicsConfig::five_axis(0.0);
        assert!(!KinematicsConfig::five_axis(0.00001).differs_from(&active));
        assert!(!KinematicsConfig::five_axis(-0.00001).differs_from(&active));
        assert!(KinematicsConfig::five_axis(0.00002).differs_from(&active));
        assert!(KinematicsConfig::five_axis(-0.00002).differs_from(&active));
    }

    #[test]
    fn epsilon_boundary_rounds_away_from_zero_base() {
        // An exact 0.00001 step only sits on the boundary from a zero base;
        // from a nonzero base the f64 difference lands just above it.
        for base in [1.0, 100.0, 101.6] {
            let active = KinematicsConfig::five_axis(base);
            assert!(
                KinematicsConfig::five_axis(base + 0.00001).differs_from(&active),
                "base {base}"
            );
            assert!(!KinematicsConfig::five_axis(base + 0.000005).differs_from(&active));
        }
    }

    #[test]
    fn pose_finite_check() {
        assert!(Pose::new(1.0, 2.0, 3.0, 0.0, 90.0).is_finite());
        assert!(!Pose::new(f64::NAN, 0.0, 0.0, 0.0, 0.0).is_finite());
    }
}

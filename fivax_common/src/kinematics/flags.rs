//! Capability and solution flags passed across the module boundary.

use bitflags::bitflags;

bitflags! {
    /// Transform directions a kinematics module implements.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Capabilities: u8 {
        /// Joints → pose.
        const FORWARD = 0x01;
        /// Pose → joints.
        const INVERSE = 0x02;
    }
}

impl Capabilities {
    /// Both directions.
    pub const BOTH: Self = Self::from_bits_truncate(Self::FORWARD.bits() | Self::INVERSE.bits());

    #[inline]
    pub const fn supports_forward(&self) -> bool {
        self.contains(Self::FORWARD)
    }

    #[inline]
    pub const fn supports_inverse(&self) -> bool {
        self.contains(Self::INVERSE)
    }
}

/// Solution-branch flags handed through forward/inverse calls.
///
/// The table mill has a single closed-form solution, so these stay zero;
/// homing clears them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KinematicsFlags {
    pub forward: u64,
    pub inverse: u64,
}

impl KinematicsFlags {
    #[inline]
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

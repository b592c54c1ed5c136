//! Mode-switch coordinator: Stable ↔ ChangeRequested → Apply.
//!
//! Owns the active kinematics config. Each cycle it compares the requested
//! config against the active one and raises `change_pending` on drift. The
//! requested config replaces the active one, whole, only on a cycle where the
//! external `change_allowed` gate is set. Only the latest request and gate
//! matter; nothing is queued.

use fivax_common::kinematics::types::KinematicsConfig;

/// Observable coordinator state between cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchState {
    /// Requested config matches the active one.
    Stable,
    /// Requested config differs; waiting for the gate.
    ChangeRequested,
}

/// What one evaluation did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SwitchOutcome {
    /// No drift, gate closed.
    Stable,
    /// Drift, gate closed. `first` is set on the cycle the drift appeared.
    Pending { first: bool },
    /// Drift disappeared without a commit.
    Reverted,
    /// Gate open: requested config committed.
    Applied {
        previous: KinematicsConfig,
        active: KinematicsConfig,
        /// False when the commit was a no-op (nothing was drifting).
        changed: bool,
    },
}

/// Active-config owner and change handshake.
#[derive(Debug, Clone)]
pub struct ModeSwitch {
    active: KinematicsConfig,
    pending: bool,
    change_count: u64,
}

impl Default for ModeSwitch {
    fn default() -> Self {
        Self::new(KinematicsConfig::trivial())
    }
}

impl ModeSwitch {
    pub const fn new(active: KinematicsConfig) -> Self {
        Self {
            active,
            pending: false,
            change_count: 0,
        }
    }

    /// Config in effect for this cycle's transforms.
    #[inline]
    pub const fn active(&self) -> KinematicsConfig {
        self.active
    }

    /// Value for the `change_pending` output.
    #[inline]
    pub const fn is_pending(&self) -> bool {
        self.pending
    }

    #[inline]
    pub const fn state(&self) -> SwitchState {
        if self.pending {
            SwitchState::ChangeRequested
        } else {
            SwitchState::Stable
        }
    }

    /// Number of commits that replaced a drifting config.
    #[inline]
    pub const fn change_count(&self) -> u64 {
        self.change_count
    }

    /// Run one cycle of the handshake.
    ///
    /// Must be called before the cycle's forward transform so that transform
    /// sees the post-commit config.
    pub fn evaluate(&mut self, requested: KinematicsConfig, change_allowed: bool) -> SwitchOutcome {
        let drift = requested.differs_from(&self.active);

        if change_allowed {
            let previous = self.active;
            self.active = requested;
            self.pending = false;
            if drift {
                self.change_count += 1;
            }
            return SwitchOutcome::Applied {
                previous,
                active: requested,
                changed: drift,
            };
        }

        let was_pending = self.pending;
        self.pending = drift;

        match (was_pending, drift) {
            (_, true) => SwitchOutcome::Pending {
                first: !was_pending,
            },
            (true, false) => SwitchOutcome::Reverted,
            (false, false) => SwitchOutcome::Stable,
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────

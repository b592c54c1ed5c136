//! Kinematics module interface and registry.
//!
//! This module defines:
//! - `KinematicsModule` trait - the entry points a host cycle calls
//! - `ModuleFactory` type alias - factory function type
//! - `lookup`/`create` - name → module resolution
//! - `require` - capability check before a module is driven
//!
//! # Lifecycle
//!
//! 1. `create()` - once at startup, before the cycle loop
//! 2. `forward()` / `inverse()` - once each per cycle
//! 3. `home()` - on homing / reset
//!
//! | Operation | RT Constraint |
//! |-----------|---------------|
//! | `create()` | None (pre-RT) |
//! | `forward()` / `inverse()` / `home()` | **HARD**, no allocation |

pub mod pocketnckins;
pub mod trivkins;

use fivax_common::kinematics::config::{POCKETNCKINS, TRIVKINS};
use fivax_common::kinematics::error::KinematicsError;
use fivax_common::kinematics::flags::{Capabilities, KinematicsFlags};
use fivax_common::kinematics::signals::SignalBank;
use fivax_common::kinematics::types::{JointVector, KinematicsConfig, Pose};

pub use pocketnckins::TableKinematics;
pub use trivkins::TrivialKinematics;

/// Factory function type for creating module instances.
pub type ModuleFactory = fn() -> Box<dyn KinematicsModule>;

/// Interface a host cycle uses to drive a kinematics module.
pub trait KinematicsModule: Send {
    /// Registered name (e.g. "pocketnckins").
    fn name(&self) -> &'static str;

    /// Directions this module implements.
    fn capabilities(&self) -> Capabilities;

    /// Config currently in effect for transforms.
    fn active_config(&self) -> KinematicsConfig;

    /// Joints → pose. Reads the request/gate inputs from `signals` and writes
    /// its outputs back before returning.
    fn forward(
        &mut self,
        signals: &mut SignalBank,
        joints: &JointVector,
        flags: &mut KinematicsFlags,
    ) -> Result<Pose, KinematicsError>;

    /// Pose → joints under the active config.
    fn inverse(
        &self,
        pose: &Pose,
        flags: &mut KinematicsFlags,
    ) -> Result<JointVector, KinematicsError>;

    /// Establish the reference pose for `joints`: clears `flags`, then runs a
    /// full forward cycle.
    fn home(
        &mut self,
        signals: &mut SignalBank,
        joints: &JointVector,
        flags: &mut KinematicsFlags,
    ) -> Result<Pose, KinematicsError> {
        flags.clear();
        self.forward(signals, joints, flags)
    }
}

fn new_pocketnckins() -> Box<dyn KinematicsModule> {
    Box::new(TableKinematics::new())
}

fn new_trivkins() -> Box<dyn KinematicsModule> {
    Box::new(TrivialKinematics)
}

const REGISTRY: [(&str, ModuleFactory); 2] = [
    (POCKETNCKINS, new_pocketnckins as ModuleFactory),
    (TRIVKINS, new_trivkins as ModuleFactory),
];

/// Names of all registered modules.
pub fn registered() -> impl Iterator<Item = &'static str> {
    REGISTRY.iter().map(|(name, _)| *name)
}

/// Resolve a module factory by name.
pub fn lookup(name: &str) -> Result<ModuleFactory, KinematicsError> {
    REGISTRY
        .iter()
        .find(|(registered, _)| *registered == name)
        .map(|(_, factory)| *factory)
        .ok_or_else(|| KinematicsError::UnknownModule(name.to_string()))
}

/// Create a module instance by name.
pub fn create(name: &str) -> Result<Box<dyn KinematicsModule>, KinematicsError> {
    lookup(name).map(|factory| factory())
}

/// Check that `module` implements every direction in `needed`.
pub fn require(module: &dyn KinematicsModule, needed: Capabilities) -> Result<(), KinematicsError> {
    let missing = needed - module.capabilities();
    if missing.contains(Capabilities::FORWARD) {
        return Err(KinematicsError::Unsupported {
            module: module.name(),
            operation: "forward",
        });
    }
    if missing.contains(Capabilities::INVERSE) {
        return Err(KinematicsError::Unsupported {
            module: module.name(),
            operation: "inverse",
        });
    }
    Ok(())
}

//! Kinematics module error types.
//!
//! Drift between requested and active config is not an error; it is reported
//! through the `change_pending` signal. These variants cover module lookup and
//! the capability check a host runs before driving a module.

use thiserror::Error;

/// Errors surfaced by kinematics modules and their registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KinematicsError {
    /// No module registered under this name.
    #[error("Unknown kinematics module: {0}")]
    UnknownModule(String),

    /// The module does not implement the requested direction.
    #[error("Operation not supported by {module}: {operation}")]
    Unsupported {
        module: &'static str,
        operation: &'static str,
    },
}

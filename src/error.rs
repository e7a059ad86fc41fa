//! Error types for the bootstrap harness.
//!
//! Each stage of startup has its own error type so callers can tell a bad
//! module name apart from a broken module or a failing service.

use thiserror::Error;

use crate::lifecycle::LifecycleState;

/// Errors raised while reading configuration or resolving a module name.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigurationError {
    /// The configured name matches no registered module.
    #[error("Unknown module '{name}'. Available modules: {available:?}")]
    UnknownModule {
        name: String,
        available: Vec<&'static str>,
    },

    /// The configured module name is blank.
    #[error("Module name is empty")]
    EmptyModuleName,

    /// The configuration sources could not be read or deserialized.
    #[error("Failed to load configuration: {0}")]
    Load(String),
}

/// Errors raised while building a container from a module.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum WiringError {
    #[error("Module '{0}' does not bind a lifecycle service")]
    MissingService(String),

    #[error("Module '{0}' binds the lifecycle service more than once")]
    DuplicateService(String),

    #[error("Module '{0}' binds the shutdown latch more than once")]
    DuplicateLatch(String),
}

/// Errors raised by a service's `run()` or `close()`.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ServiceError {
    /// The service reported a failure.
    #[error("Service failed: {0}")]
    Failed(String),

    /// The operation is not allowed in the service's current state.
    #[error("Cannot {operation} a service in state {state}")]
    InvalidState {
        operation: &'static str,
        state: LifecycleState,
    },

    /// The operation panicked; the payload message is kept when it is a string.
    #[error("Service panicked: {0}")]
    Panicked(String),
}

impl From<String> for ServiceError {
    fn from(msg: String) -> Self {
        ServiceError::Failed(msg)
    }
}

/// Any error that can end the process.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum WelderError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Wiring(#[from] WiringError),

    #[error(transparent)]
    Service(#[from] ServiceError),
}

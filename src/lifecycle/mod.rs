//! # Lifecycle Services
//!
//! The top-level object the entry point drives. A service is created once,
//! `run()` at most once, and `close()`d on every exit path.
//!
//! ## State Machine
//!
//! ```text
//!  Created ──run()──▶ Running
//!     │                  │
//!     └────close()──▶ Closed ◀──close()
//! ```
//!
//! - `close()` from `Created` is valid: a service may be shut down without
//!   ever running.
//! - `close()` from `Closed` is a no-op. The shutdown latch is counted down
//!   only on the first close.
//! - `run()` is only valid from `Created`. Running twice or running after
//!   close is rejected with [`ServiceError::InvalidState`].
//!
//! [`LifecycleState`] implements these transitions so every service shares
//! the same policy.
//!
//! ## Reference Services
//!
//! - [`Main`]: bound by the default module. Logs and signals the latch.
//! - [`Welder`]: bound by [`WelderModule`], which owns the latch it hands out.
//! - [`mock::MockLifecycle`]: scripted double for harness tests.
//!
//! ## Observability
//!
//! Every transition emits one `info` line. See [`setup_tracing`].

pub mod main_service;
pub mod mock;
pub mod telemetry;
pub mod welder;

pub use main_service::*;
pub use telemetry::*;
pub use welder::*;

use std::fmt;

use async_trait::async_trait;

use crate::error::ServiceError;

/// Contract for the single top-level service resolved from a container.
#[async_trait]
pub trait Lifecycle: Send {
    /// Name used in log lines.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Performs the service's work. May return immediately or block until done.
    async fn run(&mut self) -> Result<(), ServiceError>;

    /// Releases resources and signals shutdown. Must not block.
    async fn close(&mut self) -> Result<(), ServiceError>;
}

/// Where a service is in its lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LifecycleState {
    #[default]
    Created,
    Running,
    Closed,
}

impl LifecycleState {
    /// Moves `Created` to `Running`.
    ///
    /// Any other starting state is rejected and left unchanged.
    pub fn begin_run(&mut self) -> Result<(), ServiceError> {
        match self {
            LifecycleState::Created => {
                *self = LifecycleState::Running;
                Ok(())
            }
            state => Err(ServiceError::InvalidState {
                operation: "run",
                state: *state,
            }),
        }
    }

    /// Moves to `Closed`.
    ///
    /// Returns `false` if the service was already closed, in which case the
    /// caller skips its shutdown work.
    pub fn begin_close(&mut self) -> bool {
        if *self == LifecycleState::Closed {
            return false;
        }
        *self = LifecycleState::Closed;
        true
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LifecycleState::Created => write!(f, "Created"),
            LifecycleState::Running => write!(f, "Running"),
            LifecycleState::Closed => write!(f, "Closed"),
        }
    }
}

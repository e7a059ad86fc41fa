//! # Bootstrap & Entry Point
//!
//! Resolves the configured module, builds its container and drives the
//! resolved service through one run/close cycle.
//!
//! ## Startup Sequence
//!
//! 1. Log the chosen module name
//! 2. [`resolve_and_load`] the module (fails with [`ConfigurationError`](crate::error::ConfigurationError))
//! 3. [`build_container`] (fails with [`WiringError`](crate::error::WiringError))
//! 4. [`run_guarded`]: `run()`, then `close()` on every exit path
//! 5. Log completion
//!
//! Steps 2 and 3 happen in [`Application::bootstrap`], before any service
//! code runs. Callers that need to observe shutdown take the latch from
//! [`Application::shutdown_latch`] before calling [`Application::run`].
//!
//! ## Failure Ordering
//!
//! | `run()` | `close()` | Result                                  |
//! |---------|-----------|-----------------------------------------|
//! | Ok      | Ok        | `Ok(())`                                |
//! | Err     | Ok        | run error                               |
//! | Ok      | Err       | close error                             |
//! | Err     | Err       | run error; close error logged at `error` |
//!
//! A panic inside `run()` is caught and reported as
//! [`ServiceError::Panicked`] after `close()` has been attempted.

use std::any::Any;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use tracing::{error, info};

use crate::config::WelderConfig;
use crate::error::{ServiceError, WelderError};
use crate::latch::ShutdownLatch;
use crate::lifecycle::Lifecycle;
use crate::module::{build_container, resolve_and_load, Container, Module};

/// A resolved, wired application ready to run.
pub struct Application {
    container: Container,
}

impl Application {
    /// Resolves `module_name` from the registry and wires it.
    pub fn bootstrap(module_name: &str) -> Result<Self, WelderError> {
        info!(module = module_name, "Starting application");

        let module = resolve_and_load(module_name)?;
        Self::from_module(module.as_ref())
    }

    /// Wires an already-instantiated module.
    pub fn from_module(module: &dyn Module) -> Result<Self, WelderError> {
        let container = build_container(module)?;
        Ok(Self { container })
    }

    pub fn module_name(&self) -> &str {
        self.container.module_name()
    }

    /// Latch released when the service closes.
    pub fn shutdown_latch(&self) -> ShutdownLatch {
        self.container.shutdown_latch()
    }

    /// Runs the service once and closes it.
    pub async fn run(self) -> Result<(), WelderError> {
        let mut service = self.container.into_service();

        let result = run_guarded(service.as_mut()).await;

        info!("Stopped application.");
        result.map_err(WelderError::from)
    }
}

/// Calls `run()` then `close()`, attempting `close()` even if `run()` fails or panics.
pub async fn run_guarded(service: &mut dyn Lifecycle) -> Result<(), ServiceError> {
    let ran = AssertUnwindSafe(service.run())
        .catch_unwind()
        .await
        .unwrap_or_else(|panic| Err(ServiceError::Panicked(panic_message(panic.as_ref()))));

    if let Err(e) = &ran {
        error!(service = service.name(), error = %e, "Run failed");
    }

    let closed = AssertUnwindSafe(service.close())
        .catch_unwind()
        .await
        .unwrap_or_else(|panic| Err(ServiceError::Panicked(panic_message(panic.as_ref()))));

    match (ran, closed) {
        (Ok(()), Ok(())) => Ok(()),
        (Err(e), Ok(())) | (Ok(()), Err(e)) => Err(e),
        (Err(run_error), Err(close_error)) => {
            error!(
                service = service.name(),
                error = %close_error,
                "Close failed after run failure"
            );
            Err(run_error)
        }
    }
}

/// Bootstraps the configured module and runs it to completion.
pub async fn launch(config: &WelderConfig) -> Result<(), WelderError> {
    Application::bootstrap(&config.module)?.run().await
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

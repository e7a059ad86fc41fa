//! The common welder service and its module.
//!
//! Unlike [`MainModule`](super::MainModule), [`WelderModule`] owns the
//! shutdown latch and binds it into the container itself, so the latch
//! outlives any single container built from the same module.

use async_trait::async_trait;
use tracing::{debug, info};

use crate::error::{ServiceError, WiringError};
use crate::latch::ShutdownLatch;
use crate::lifecycle::{Lifecycle, LifecycleState};
use crate::module::{Binder, Module};

/// Registry name of [`WelderModule`].
pub const WELDER_MODULE_NAME: &str = "cryptowelder::welder::Module";

/// Module that binds its own latch and a [`Welder`] service.
#[derive(Debug, Clone, Default)]
pub struct WelderModule {
    latch: ShutdownLatch,
}

impl WelderModule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle to the latch this module binds.
    pub fn latch(&self) -> ShutdownLatch {
        self.latch.clone()
    }
}

impl Module for WelderModule {
    fn name(&self) -> &str {
        WELDER_MODULE_NAME
    }

    fn configure(&self, binder: &mut Binder) -> Result<(), WiringError> {
        binder.bind_latch(self.latch.clone())?;
        binder.bind_service(Welder::new)
    }
}

/// The top-level welder service.
///
/// `run()` returns once the service is started; `close()` counts down the
/// shutdown latch exactly once.
#[derive(Debug)]
pub struct Welder {
    state: LifecycleState,
    latch: ShutdownLatch,
}

impl Welder {
    pub fn new(latch: ShutdownLatch) -> Self {
        Self {
            state: LifecycleState::Created,
            latch,
        }
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }
}

#[async_trait]
impl Lifecycle for Welder {
    fn name(&self) -> &str {
        "Welder"
    }

    #[tracing::instrument(skip(self))]
    async fn run(&mut self) -> Result<(), ServiceError> {
        self.state.begin_run()?;
        info!(service = "Welder", "Running.");
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn close(&mut self) -> Result<(), ServiceError> {
        if !self.state.begin_close() {
            debug!("Already terminated");
            return Ok(());
        }
        info!(service = "Welder", "Terminating.");
        let released = self.latch.count_down();
        debug!(released, remaining = self.latch.count(), "Latch counted down");
        Ok(())
    }
}

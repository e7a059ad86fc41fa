//! The default, self-bound service.

use async_trait::async_trait;
use tracing::info;

use crate::error::{ServiceError, WiringError};
use crate::latch::ShutdownLatch;
use crate::lifecycle::{Lifecycle, LifecycleState};
use crate::module::{Binder, Module};

/// Registry name of [`MainModule`]. Used when no module is configured.
pub const MAIN_MODULE_NAME: &str = "cryptowelder::Main";

/// Module that binds [`Main`] and lets the container create the latch.
#[derive(Debug, Clone, Copy, Default)]
pub struct MainModule;

impl Module for MainModule {
    fn name(&self) -> &str {
        MAIN_MODULE_NAME
    }

    fn configure(&self, binder: &mut Binder) -> Result<(), WiringError> {
        binder.bind_service(Main::new)
    }
}

/// Service that does nothing but log its transitions.
#[derive(Debug)]
pub struct Main {
    state: LifecycleState,
    latch: ShutdownLatch,
}

impl Main {
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
impl Lifecycle for Main {
    fn name(&self) -> &str {
        MAIN_MODULE_NAME
    }

    async fn run(&mut self) -> Result<(), ServiceError> {
        self.state.begin_run()?;
        info!(service = MAIN_MODULE_NAME, "Run.");
        Ok(())
    }

    async fn close(&mut self) -> Result<(), ServiceError> {
        if !self.state.begin_close() {
            return Ok(());
        }
        info!(service = MAIN_MODULE_NAME, "Close.");
        self.latch.count_down();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::build_container;

    #[tokio::test]
    async fn test_main_run_then_close() {
        let latch = ShutdownLatch::new();
        let mut main = Main::new(latch.clone());

        main.run().await.unwrap();
        assert_eq!(main.state(), LifecycleState::Running);
        assert!(!latch.is_released());

        main.close().await.unwrap();
        assert_eq!(main.state(), LifecycleState::Closed);
        assert!(latch.is_released());
    }

    #[test]
    fn test_main_module_wires_container() {
        let container = build_container(&MainModule).unwrap();
        assert_eq!(container.module_name(), MAIN_MODULE_NAME);
        assert_eq!(container.shutdown_latch().count(), 1);
    }
}

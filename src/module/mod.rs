//! # Modules & Containers
//!
//! A [`Module`] describes how to build the object graph; a [`Container`] is
//! the realized graph. Wiring is explicit: a module hands the [`Binder`] a
//! factory for the lifecycle service and, optionally, a shutdown latch.
//!
//! ```rust,ignore
//! impl Module for MyModule {
//!     fn name(&self) -> &str { "my::Module" }
//!
//!     fn configure(&self, binder: &mut Binder) -> Result<(), WiringError> {
//!         binder.bind_latch(self.latch.clone())?;
//!         binder.bind_service(MyService::new)
//!     }
//! }
//!
//! let container = build_container(&MyModule::default())?;
//! ```
//!
//! The service factory receives the container's latch directly, so nothing
//! looks the latch up after construction. When a module binds no latch the
//! container creates one with a count of one.

pub mod registry;

pub use registry::*;

use tracing::debug;

use crate::error::WiringError;
use crate::latch::ShutdownLatch;
use crate::lifecycle::Lifecycle;

/// Constructs the lifecycle service once the latch is known.
pub type ServiceFactory = Box<dyn FnOnce(ShutdownLatch) -> Box<dyn Lifecycle> + Send>;

/// Declarative description of the object graph.
pub trait Module: Send + Sync {
    /// Name used in logs and wiring errors.
    fn name(&self) -> &str;

    /// Records this module's bindings.
    fn configure(&self, binder: &mut Binder) -> Result<(), WiringError>;
}

/// Collects bindings while a module is configured.
///
/// Each binding may be made at most once.
pub struct Binder {
    module: String,
    service: Option<ServiceFactory>,
    latch: Option<ShutdownLatch>,
}

impl Binder {
    fn new(module: &str) -> Self {
        Self {
            module: module.to_string(),
            service: None,
            latch: None,
        }
    }

    /// Binds the factory for the top-level lifecycle service.
    pub fn bind_service<F, S>(&mut self, factory: F) -> Result<(), WiringError>
    where
        F: FnOnce(ShutdownLatch) -> S + Send + 'static,
        S: Lifecycle + 'static,
    {
        if self.service.is_some() {
            return Err(WiringError::DuplicateService(self.module.clone()));
        }
        let boxed: ServiceFactory =
            Box::new(move |latch| -> Box<dyn Lifecycle> { Box::new(factory(latch)) });
        self.service = Some(boxed);
        Ok(())
    }

    /// Binds a specific shutdown latch instead of a container-created one.
    pub fn bind_latch(&mut self, latch: ShutdownLatch) -> Result<(), WiringError> {
        if self.latch.is_some() {
            return Err(WiringError::DuplicateLatch(self.module.clone()));
        }
        self.latch = Some(latch);
        Ok(())
    }
}

/// The realized object graph: one lifecycle service and its shutdown latch.
///
/// Built once per process and not reconfigured afterwards.
pub struct Container {
    module: String,
    service: Box<dyn Lifecycle>,
    latch: ShutdownLatch,
}

impl Container {
    /// Configures `module` and instantiates its service.
    pub fn build(module: &dyn Module) -> Result<Self, WiringError> {
        let mut binder = Binder::new(module.name());
        module.configure(&mut binder)?;

        let Binder {
            module: name,
            service,
            latch,
        } = binder;

        let factory = service.ok_or_else(|| WiringError::MissingService(name.clone()))?;
        let latch_bound = latch.is_some();
        let latch = latch.unwrap_or_default();
        let service = factory(latch.clone());

        debug!(
            module = %name,
            service = service.name(),
            latch_bound,
            "Container built"
        );

        Ok(Self {
            module: name,
            service,
            latch,
        })
    }

    pub fn module_name(&self) -> &str {
        &self.module
    }

    /// Handle to the latch the service counts down on close.
    pub fn shutdown_latch(&self) -> ShutdownLatch {
        self.latch.clone()
    }

    pub fn service_mut(&mut self) -> &mut dyn Lifecycle {
        self.service.as_mut()
    }

    pub fn into_service(self) -> Box<dyn Lifecycle> {
        self.service
    }
}

/// Builds the container for `module`.
pub fn build_container(module: &dyn Module) -> Result<Container, WiringError> {
    Container::build(module)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::mock::MockLifecycle;

    struct EmptyModule;

    impl Module for EmptyModule {
        fn name(&self) -> &str {
            "test::Empty"
        }

        fn configure(&self, _binder: &mut Binder) -> Result<(), WiringError> {
            Ok(())
        }
    }

    struct TwiceModule {
        latches: bool,
    }

    impl Module for TwiceModule {
        fn name(&self) -> &str {
            "test::Twice"
        }

        fn configure(&self, binder: &mut Binder) -> Result<(), WiringError> {
            if self.latches {
                binder.bind_latch(ShutdownLatch::new())?;
                binder.bind_latch(ShutdownLatch::new())?;
            }
            binder.bind_service(MockLifecycle::new)?;
            binder.bind_service(MockLifecycle::new)
        }
    }

    #[test]
    fn test_missing_service_binding() {
        let err = build_container(&EmptyModule).err().unwrap();
        assert_eq!(err, WiringError::MissingService("test::Empty".to_string()));
    }

    #[test]
    fn test_duplicate_service_binding() {
        let err = build_container(&TwiceModule { latches: false }).err().unwrap();
        assert_eq!(err, WiringError::DuplicateService("test::Twice".to_string()));
    }

    #[test]
    fn test_duplicate_latch_binding() {
        let err = build_container(&TwiceModule { latches: true }).err().unwrap();
        assert_eq!(err, WiringError::DuplicateLatch("test::Twice".to_string()));
    }

    #[tokio::test]
    async fn test_service_receives_container_latch() {
        struct MockModule;

        impl Module for MockModule {
            fn name(&self) -> &str {
                "test::Mock"
            }

            fn configure(&self, binder: &mut Binder) -> Result<(), WiringError> {
                binder.bind_service(MockLifecycle::new)
            }
        }

        let mut container = build_container(&MockModule).unwrap();
        let latch = container.shutdown_latch();

        container.service_mut().close().await.unwrap();
        assert!(latch.is_released());
    }
}

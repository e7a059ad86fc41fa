use std::time::Duration;

use cryptowelder::bootstrap::{launch, Application};
use cryptowelder::config::WelderConfig;
use cryptowelder::error::{ConfigurationError, ServiceError, WelderError, WiringError};
use cryptowelder::latch::ShutdownLatch;
use cryptowelder::lifecycle::mock::{Call, CallLog, MockLifecycle};
use cryptowelder::lifecycle::{setup_tracing, WelderModule, MAIN_MODULE_NAME, WELDER_MODULE_NAME};
use cryptowelder::module::{Binder, Module, DEFAULT_MODULE};

/// Module that binds a scripted mock and exposes its call log.
struct ScriptedModule {
    fail_run: Option<&'static str>,
    fail_close: Option<&'static str>,
    calls: std::sync::Mutex<Option<CallLog>>,
}

impl ScriptedModule {
    fn new(fail_run: Option<&'static str>, fail_close: Option<&'static str>) -> Self {
        Self {
            fail_run,
            fail_close,
            calls: std::sync::Mutex::new(None),
        }
    }

    fn calls(&self) -> CallLog {
        self.calls.lock().unwrap().clone().expect("module was not configured")
    }
}

impl Module for ScriptedModule {
    fn name(&self) -> &str {
        "test::Scripted"
    }

    fn configure(&self, binder: &mut Binder) -> Result<(), WiringError> {
        let latch = ShutdownLatch::new();
        let mut mock = MockLifecycle::new(latch.clone());
        if let Some(message) = self.fail_run {
            mock.fail_run(message);
        }
        if let Some(message) = self.fail_close {
            mock.fail_close(message);
        }
        *self.calls.lock().unwrap() = Some(mock.calls());

        binder.bind_latch(latch)?;
        binder.bind_service(move |_| mock)
    }
}

/// Full cycle with the default module and no configuration.
#[tokio::test]
async fn test_default_module_full_cycle() {
    setup_tracing();

    let app = Application::bootstrap(DEFAULT_MODULE).expect("default module should wire");
    assert_eq!(app.module_name(), MAIN_MODULE_NAME);

    let latch = app.shutdown_latch();
    app.run().await.expect("default cycle should succeed");

    assert!(latch.wait_timeout(Duration::from_secs(1)).await);
}

#[tokio::test]
async fn test_launch_with_default_config() {
    launch(&WelderConfig::default())
        .await
        .expect("launch with defaults should succeed");
}

/// A waiter on another task is released by the welder's close.
#[tokio::test]
async fn test_welder_releases_waiter_on_other_task() {
    let module = WelderModule::new();
    let waiter = module.latch();
    let handle = tokio::spawn(async move { waiter.wait_timeout(Duration::from_secs(1)).await });

    let app = Application::from_module(&module).unwrap();
    assert_eq!(app.module_name(), WELDER_MODULE_NAME);
    app.run().await.unwrap();

    assert!(handle.await.unwrap(), "latch was not released within 1s");
}

#[tokio::test]
async fn test_welder_by_alias() {
    let app = Application::bootstrap("welder").unwrap();
    let latch = app.shutdown_latch();

    app.run().await.unwrap();
    assert!(latch.is_released());
}

/// Unknown names fail before any service is created or run.
#[test]
fn test_unresolvable_module_name() {
    let err = Application::bootstrap("com.example.DoesNotExist").err().unwrap();

    match err {
        WelderError::Configuration(ConfigurationError::UnknownModule { name, available }) => {
            assert_eq!(name, "com.example.DoesNotExist");
            assert!(available.contains(&DEFAULT_MODULE));
        }
        other => panic!("expected configuration error, got {other:?}"),
    }
}

/// Close still runs exactly once when run fails, and the run error propagates.
#[tokio::test]
async fn test_close_runs_when_run_fails() {
    let module = ScriptedModule::new(Some("exchange unreachable"), None);
    let app = Application::from_module(&module).unwrap();
    let latch = app.shutdown_latch();
    let calls = module.calls();

    let err = app.run().await.unwrap_err();

    assert_eq!(
        err,
        WelderError::Service(ServiceError::Failed("exchange unreachable".to_string()))
    );
    assert_eq!(calls.snapshot(), vec![Call::Run, Call::Close]);
    assert!(latch.wait_timeout(Duration::from_secs(1)).await);
}

#[tokio::test]
async fn test_run_error_reported_when_both_fail() {
    let module = ScriptedModule::new(Some("run broke"), Some("close broke"));
    let app = Application::from_module(&module).unwrap();
    let calls = module.calls();

    let err = app.run().await.unwrap_err();

    assert_eq!(
        err,
        WelderError::Service(ServiceError::Failed("run broke".to_string()))
    );
    assert_eq!(calls.count(Call::Close), 1);
}

//! # Mock Lifecycle
//!
//! A scripted [`Lifecycle`] for testing the harness without a real service.
//!
//! Script failures with [`MockLifecycle::fail_run`], [`MockLifecycle::fail_close`]
//! or [`MockLifecycle::panic_on_run`], then inspect the recorded calls through
//! the [`CallLog`] handle after the service has been moved into the harness.
//!
//! ```rust,ignore
//! let mut mock = MockLifecycle::new(latch.clone());
//! mock.fail_run("boom");
//! let calls = mock.calls();
//!
//! let result = run_guarded(&mut mock).await;
//! assert_eq!(calls.snapshot(), vec![Call::Run, Call::Close]);
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::ServiceError;
use crate::latch::ShutdownLatch;
use crate::lifecycle::{Lifecycle, LifecycleState};

/// A call observed by the mock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    Run,
    Close,
}

/// What a scripted `run()` does.
#[derive(Debug, Clone)]
enum RunBehavior {
    Succeed,
    Fail(String),
    Panic(String),
}

/// Shared record of the calls a [`MockLifecycle`] received.
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<Call>>>,
}

impl CallLog {
    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    /// Copy of the calls so far, in order.
    pub fn snapshot(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, call: Call) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| **c == call)
            .count()
    }
}

/// A lifecycle service whose outcomes are set up front.
///
/// The mock follows the same [`LifecycleState`] policy as the real services,
/// so a second `close()` is a no-op and never counts the latch down again.
pub struct MockLifecycle {
    state: LifecycleState,
    latch: ShutdownLatch,
    run: RunBehavior,
    close_error: Option<String>,
    calls: CallLog,
}

impl MockLifecycle {
    /// Creates a mock whose `run()` and `close()` both succeed.
    pub fn new(latch: ShutdownLatch) -> Self {
        Self {
            state: LifecycleState::Created,
            latch,
            run: RunBehavior::Succeed,
            close_error: None,
            calls: CallLog::default(),
        }
    }

    /// Makes `run()` return [`ServiceError::Failed`].
    pub fn fail_run(&mut self, message: impl Into<String>) -> &mut Self {
        self.run = RunBehavior::Fail(message.into());
        self
    }

    /// Makes `run()` panic with `message`.
    pub fn panic_on_run(&mut self, message: impl Into<String>) -> &mut Self {
        self.run = RunBehavior::Panic(message.into());
        self
    }

    /// Makes `close()` return [`ServiceError::Failed`] after counting down the latch.
    pub fn fail_close(&mut self, message: impl Into<String>) -> &mut Self {
        self.close_error = Some(message.into());
        self
    }

    /// Handle to the call record that stays valid after the mock is moved.
    pub fn calls(&self) -> CallLog {
        self.calls.clone()
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }
}

#[async_trait]
impl Lifecycle for MockLifecycle {
    fn name(&self) -> &str {
        "MockLifecycle"
    }

    async fn run(&mut self) -> Result<(), ServiceError> {
        self.calls.record(Call::Run);
        self.state.begin_run()?;
        match &self.run {
            RunBehavior::Succeed => Ok(()),
            RunBehavior::Fail(message) => Err(ServiceError::Failed(message.clone())),
            RunBehavior::Panic(message) => panic!("{}", message),
        }
    }

    async fn close(&mut self) -> Result<(), ServiceError> {
        self.calls.record(Call::Close);
        if !self.state.begin_close() {
            return Ok(());
        }
        self.latch.count_down();
        match &self.close_error {
            Some(message) => Err(ServiceError::Failed(message.clone())),
            None => Ok(()),
        }
    }
}

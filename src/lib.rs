//! # cryptowelder
//!
//! Bootstrap shell for the cryptowelder application: picks a module by
//! name, wires it into a container and drives the resolved service through
//! a `run()`/`close()` cycle.
//!
//! ## Module Tour
//!
//! ### 1. The Entry Point ([`bootstrap`])
//! - **Role**: Resolve, wire, run, and always close.
//! - **Key items**: [`Application`](bootstrap::Application), [`run_guarded`](bootstrap::run_guarded), [`launch`](bootstrap::launch).
//!
//! ### 2. The Wiring ([`module`])
//! - **Role**: Explicit modules and a static registry in place of reflection.
//! - **Key items**: [`Module`](module::Module), [`Container`](module::Container), [`resolve_and_load`](module::resolve_and_load).
//!
//! ### 3. The Services ([`lifecycle`])
//! - **Role**: The top-level service contract, its state machine and the reference services.
//! - **Key items**: [`Lifecycle`](lifecycle::Lifecycle), [`LifecycleState`](lifecycle::LifecycleState), [`Welder`](lifecycle::Welder).
//!
//! ### 4. The Signal ([`latch`])
//! - **Role**: Lets another task wait for shutdown to complete.
//! - **Key items**: [`ShutdownLatch`](latch::ShutdownLatch).
//!
//! ## Running
//!
//! ```bash
//! # Default module
//! cryptowelder
//!
//! # Pick a module by name
//! CRYPTOWELDER_MODULE=welder cryptowelder
//! cryptowelder --module cryptowelder::welder::Module
//! ```

pub mod bootstrap;
pub mod config;
pub mod error;
pub mod latch;
pub mod lifecycle;
pub mod module;

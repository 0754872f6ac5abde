//! Process-wide subsystem activation tokens
//!
//! Three independent subsystems follow the same lifecycle: a global startup
//! call that yields a token, and a global shutdown call that consumes it.
//! Each token type here performs the startup on construction and the
//! shutdown on drop, and holds whatever the shutdown call needs.
//!
//! At most one live token per subsystem is meaningful in a process. Double
//! activation is a detectable error, not undefined behavior: each token
//! type tracks its subsystem's activity with a process-wide flag and
//! refuses to start a second time while the first token lives.
//!
//! Any guard over a handle the subsystem minted (interface, drawing object,
//! context) must live strictly inside the corresponding token's lifetime.

pub mod canvas;

pub use canvas::{Canvas2dFlags, Canvas2dRuntime, Canvas2dToken};

use std::sync::atomic::{AtomicBool, Ordering};

use thiserror::Error;

/// Failure modes of subsystem activation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StartupError {
    /// The subsystem already has a live token in this process.
    #[error("subsystem is already active in this process")]
    AlreadyActive,

    /// The subsystem's own startup call failed.
    #[error("subsystem startup failed: {0}")]
    Failed(String),
}

/// A global subsystem with plain start/stop semantics.
pub trait Runtime {
    /// Whatever the shutdown call needs; recorded by the token.
    type Token: Copy;

    /// Perform global startup.
    fn startup(&self) -> Result<Self::Token, StartupError>;

    /// Perform global shutdown with the token startup returned.
    fn shutdown(&self, token: Self::Token);
}

static OBJECT_MODEL_ACTIVE: AtomicBool = AtomicBool::new(false);
static LINKING_ACTIVE: AtomicBool = AtomicBool::new(false);

fn start_exclusive<R: Runtime>(flag: &AtomicBool, runtime: &R) -> Result<R::Token, StartupError> {
    if flag.swap(true, Ordering::AcqRel) {
        return Err(StartupError::AlreadyActive);
    }
    match runtime.startup() {
        Ok(token) => Ok(token),
        Err(err) => {
            flag.store(false, Ordering::Release);
            Err(err)
        }
    }
}

/// Activation token for the structured object model runtime.
pub struct ObjectModelToken<'r, R: Runtime> {
    runtime: &'r R,
    token: R::Token,
}

impl<'r, R: Runtime> ObjectModelToken<'r, R> {
    /// Start the runtime; fails with [`StartupError::AlreadyActive`] while
    /// another token lives.
    pub fn start(runtime: &'r R) -> Result<Self, StartupError> {
        let token = start_exclusive(&OBJECT_MODEL_ACTIVE, runtime)?;
        log::info!("object model runtime started");
        Ok(Self { runtime, token })
    }
}

impl<R: Runtime> Drop for ObjectModelToken<'_, R> {
    fn drop(&mut self) {
        self.runtime.shutdown(self.token);
        OBJECT_MODEL_ACTIVE.store(false, Ordering::Release);
        log::info!("object model runtime stopped");
    }
}

/// Activation token for the object-linking runtime.
pub struct LinkingToken<'r, R: Runtime> {
    runtime: &'r R,
    token: R::Token,
}

impl<'r, R: Runtime> LinkingToken<'r, R> {
    /// Start the runtime; fails with [`StartupError::AlreadyActive`] while
    /// another token lives.
    pub fn start(runtime: &'r R) -> Result<Self, StartupError> {
        let token = start_exclusive(&LINKING_ACTIVE, runtime)?;
        log::info!("object linking runtime started");
        Ok(Self { runtime, token })
    }
}

impl<R: Runtime> Drop for LinkingToken<'_, R> {
    fn drop(&mut self) {
        self.runtime.shutdown(self.token);
        LINKING_ACTIVE.store(false, Ordering::Release);
        log::info!("object linking runtime stopped");
    }
}

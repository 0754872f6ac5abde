//! 2-D graphics runtime token
//!
//! Like the plain runtime tokens, plus one configuration wrinkle: very
//! early in process startup the subsystem's internal background worker can
//! emit inter-process messages before anyone is ready for them, causing
//! spurious timeouts downstream. Callers initializing that early suppress
//! the worker, and the subsystem then needs a notification hook registered
//! for the same lifetime so it can synchronize with the caller instead.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::runtime::StartupError;

bitflags::bitflags! {
    /// Startup configuration for the 2-D graphics runtime.
    #[derive(Clone, Copy, PartialEq, Eq, Debug)]
    pub struct Canvas2dFlags: u32 {
        /// Do not spawn the subsystem's internal background worker thread.
        const SUPPRESS_BACKGROUND_WORKER = 1;
    }
}

/// The 2-D graphics runtime's global lifecycle API.
pub trait Canvas2dRuntime {
    /// Whatever the shutdown call needs; recorded by the token.
    type Token: Copy;

    /// Identifies a registered notification hook.
    type HookToken: Copy;

    /// Perform global startup with the given configuration.
    fn startup(&self, flags: Canvas2dFlags) -> Result<Self::Token, StartupError>;

    /// Perform global shutdown with the token startup returned.
    fn shutdown(&self, token: Self::Token);

    /// Register the notification hook used in lieu of the background
    /// worker.
    fn register_hook(&self) -> Self::HookToken;

    /// Unregister a previously registered hook.
    fn unregister_hook(&self, hook: Self::HookToken);
}

static CANVAS2D_ACTIVE: AtomicBool = AtomicBool::new(false);

/// Activation token for the 2-D graphics runtime.
///
/// When started with
/// [`SUPPRESS_BACKGROUND_WORKER`](Canvas2dFlags::SUPPRESS_BACKGROUND_WORKER)
/// the token registers the notification hook right after startup and
/// unregisters it immediately before shutdown, in that order.
pub struct Canvas2dToken<'r, R: Canvas2dRuntime> {
    runtime: &'r R,
    token: R::Token,
    hook: Option<R::HookToken>,
}

impl<'r, R: Canvas2dRuntime> Canvas2dToken<'r, R> {
    /// Start the runtime; fails with [`StartupError::AlreadyActive`] while
    /// another token lives.
    pub fn start(runtime: &'r R, flags: Canvas2dFlags) -> Result<Self, StartupError> {
        if CANVAS2D_ACTIVE.swap(true, Ordering::AcqRel) {
            return Err(StartupError::AlreadyActive);
        }
        let token = match runtime.startup(flags) {
            Ok(token) => token,
            Err(err) => {
                CANVAS2D_ACTIVE.store(false, Ordering::Release);
                return Err(err);
            }
        };
        let hook = flags
            .contains(Canvas2dFlags::SUPPRESS_BACKGROUND_WORKER)
            .then(|| {
                log::debug!("registering canvas notification hook");
                runtime.register_hook()
            });
        log::info!("2-D canvas runtime started (flags: {flags:?})");
        Ok(Self {
            runtime,
            token,
            hook,
        })
    }
}

impl<R: Canvas2dRuntime> Drop for Canvas2dToken<'_, R> {
    fn drop(&mut self) {
        // Unhook before shutdown, mirroring the registration order.
        if let Some(hook) = self.hook.take() {
            self.runtime.unregister_hook(hook);
        }
        self.runtime.shutdown(self.token);
        CANVAS2D_ACTIVE.store(false, Ordering::Release);
        log::info!("2-D canvas runtime stopped");
    }
}

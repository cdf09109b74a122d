//! Engine observer trait: the user-facing surface for behavior changes and
//! errors.

use mascot_core::Mascot;

use crate::EngineError;

/// Callbacks invoked by [`MascotDriver`][crate::MascotDriver].
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: error dialog
///
/// ```rust,ignore
/// struct Dialogs;
///
/// impl EngineObserver for Dialogs {
///     fn on_error(&mut self, mascot: &Mascot, error: &EngineError) {
///         show_message(&format!("{}: {error}", mascot.id));
///     }
/// }
/// ```
pub trait EngineObserver {
    /// A new behavior was initialised and installed.
    fn on_behavior(&mut self, _mascot: &Mascot, _behavior: &str) {}

    /// Called at the end of every processed tick.
    fn on_tick(&mut self, _mascot: &Mascot) {}

    /// Something went wrong.  The driver has already recovered, or will
    /// dispose the mascot right after this call.
    fn on_error(&mut self, _mascot: &Mascot, _error: &EngineError) {}

    /// The mascot was disposed and will not tick again.
    fn on_dispose(&mut self, _mascot: &Mascot) {}
}

/// An [`EngineObserver`] that does nothing.
pub struct NoopObserver;

impl EngineObserver for NoopObserver {}

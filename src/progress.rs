//! # Progress & Cancellation
//!
//! Long-running algorithms (components, 4-sweep, iFUB) perform many
//! single-source visits. Between two visits they notify a [`ProgressObserver`]
//! and poll its cancellation flag; when the flag trips they stop and return
//! [`Error::Cancelled`](crate::error::Error::Cancelled) instead of a partial
//! result. One notification per visit is the guaranteed granularity.
//!
//! The crate depends on no UI or progress framework: hosts implement this
//! trait however they like (channel to a UI thread, `AtomicBool`, ...).

/// Narrow interface between the graph engine and a host that wants progress
/// updates or the ability to abort.
pub trait ProgressObserver {
    /// Called once before every single-source visit. `label` names the
    /// logical step (e.g. `"forward visit"`, `"scc round"`).
    fn on_visit(&self, label: &str) {
        let _ = label;
    }

    /// Polled together with [`ProgressObserver::on_visit`]. Returning *true*
    /// makes the running algorithm return `Error::Cancelled`.
    fn is_cancelled(&self) -> bool {
        false
    }
}

/// Observer that ignores all notifications and never cancels.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {}

impl<T: ProgressObserver + ?Sized> ProgressObserver for &T {
    fn on_visit(&self, label: &str) {
        (**self).on_visit(label)
    }

    fn is_cancelled(&self) -> bool {
        (**self).is_cancelled()
    }
}

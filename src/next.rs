//! The error-continuation handed to every handler.
//!
//! `Next` is the crate's view of the host framework's `next` callback: a
//! callable taking zero or one argument, where the one-argument form carries
//! an error into the framework's error pipeline. The host builds one per
//! request ([`Next::new`]) and decides what "proceed" and "fail" mean —
//! usually "run the next stage" and "run the error-rendering middleware".

use std::sync::Arc;

use crate::error::RouteError;

/// Hands control (or an error) to the next stage of the host's pipeline.
///
/// Cloneable: the handler and the rejection-forwarding wrapper may both hold
/// it. Clones share the same underlying callback.
#[derive(Clone)]
pub struct Next {
    inner: Arc<dyn Fn(Option<RouteError>) + Send + Sync + 'static>,
}

impl Next {
    /// Builds a continuation from the host's callback. `None` means "no
    /// error, carry on"; `Some(reason)` means "route this to error handling".
    pub fn new(f: impl Fn(Option<RouteError>) + Send + Sync + 'static) -> Self {
        Self { inner: Arc::new(f) }
    }

    /// Hands control onward with no error.
    pub fn proceed(&self) {
        (self.inner)(None);
    }

    /// Surfaces `reason` to the host's error pipeline.
    pub fn fail(&self, reason: impl Into<RouteError>) {
        (self.inner)(Some(reason.into()));
    }
}

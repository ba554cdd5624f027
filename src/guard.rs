//! Router decorator applying the wrapper at registration time.
//!
//! Patching verb methods in place on a caller-owned router is hidden mutable
//! state. A decorator does the same job in the open: [`guard`] consumes the
//! router and returns a value implementing the same [`Register`] interface,
//! so application code registers routes exactly as before — each async
//! handler just arrives pre-wrapped.

use http::Method;
use tracing::debug;

use crate::handler::{Handler, wrap};
use crate::register::Register;

/// Decorates `router` so every async handler registered for a guarded verb is
/// passed through [`wrap`](crate::wrap) before delegation.
///
/// Call once at setup time, before the router starts serving:
///
/// ```text
/// let mut app = guard(router);
/// app.get("/users", [Handler::from_async(list_users)]);
/// ```
pub fn guard<R>(router: R) -> Guard<R> {
    Guard::new(router)
}

/// A router decorator. See [`guard`].
///
/// Implements [`Register`] by delegating to the inner router, wrapping the
/// handler list first when the verb is guarded. The inner router's return
/// value comes back unchanged, and [`Guard::into_inner`] recovers the router
/// itself.
pub struct Guard<R> {
    inner: R,
    verbs: Vec<Method>,
}

/// The default guarded verb set.
///
/// PATCH is deliberately included: leaving it out is the kind of gap that
/// only shows up when a PATCH route starts swallowing its errors.
fn default_verbs() -> Vec<Method> {
    vec![Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::PATCH]
}

impl<R> Guard<R> {
    /// Guards `inner` for GET, POST, PUT, DELETE and PATCH.
    pub fn new(inner: R) -> Self {
        Self { inner, verbs: default_verbs() }
    }

    /// Guards `inner` for an explicit verb set. Registrations for any other
    /// verb delegate with their handlers untouched.
    pub fn with_verbs(inner: R, verbs: impl IntoIterator<Item = Method>) -> Self {
        Self { inner, verbs: verbs.into_iter().collect() }
    }

    /// The guarded verb set.
    pub fn verbs(&self) -> &[Method] {
        &self.verbs
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    /// Unwraps the decorator, returning the inner router.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<Req, Res, R> Register<Req, Res> for Guard<R>
where
    R: Register<Req, Res>,
    Req: Send + 'static,
    Res: Send + 'static,
{
    type Output = R::Output;

    fn register(
        &mut self,
        method: Method,
        path: &str,
        handlers: Vec<Handler<Req, Res>>,
    ) -> R::Output {
        let handlers = if self.verbs.contains(&method) {
            debug!(%method, path, "registering with rejection forwarding");
            handlers.into_iter().map(wrap).collect()
        } else {
            handlers
        };
        self.inner.register(method, path, handlers)
    }
}

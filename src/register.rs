//! The registration seam between this crate and the host router.
//!
//! This crate ships no router of its own. Whatever object the host uses to
//! register routes implements [`Register`] — one required method — and then
//! plugs straight into [`guard`](crate::guard). The verb-named sugar mirrors
//! the registration surface most routers expose.

use http::Method;

use crate::handler::Handler;

/// A router-like object: something with verb-based route registration.
///
/// `Req` and `Res` are the host's request/response contexts, and `Output` is
/// whatever the host's registration returns — a chained `&mut Self`, a route
/// id, `()` — passed through [`Guard`](crate::Guard) untouched.
pub trait Register<Req, Res> {
    /// The host's implementation-defined registration return value.
    type Output;

    /// Registers `handlers` for `method` + `path`.
    fn register(
        &mut self,
        method: Method,
        path: &str,
        handlers: Vec<Handler<Req, Res>>,
    ) -> Self::Output;

    fn get(&mut self, path: &str, handlers: impl IntoIterator<Item = Handler<Req, Res>>) -> Self::Output {
        self.register(Method::GET, path, handlers.into_iter().collect())
    }

    fn post(&mut self, path: &str, handlers: impl IntoIterator<Item = Handler<Req, Res>>) -> Self::Output {
        self.register(Method::POST, path, handlers.into_iter().collect())
    }

    fn put(&mut self, path: &str, handlers: impl IntoIterator<Item = Handler<Req, Res>>) -> Self::Output {
        self.register(Method::PUT, path, handlers.into_iter().collect())
    }

    fn delete(&mut self, path: &str, handlers: impl IntoIterator<Item = Handler<Req, Res>>) -> Self::Output {
        self.register(Method::DELETE, path, handlers.into_iter().collect())
    }

    fn patch(&mut self, path: &str, handlers: impl IntoIterator<Item = Handler<Req, Res>>) -> Self::Output {
        self.register(Method::PATCH, path, handlers.into_iter().collect())
    }
}

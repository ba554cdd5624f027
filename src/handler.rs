//! Handler classification and the rejection-forwarding wrapper.
//!
//! # Why a tagged handler type
//!
//! The host framework cannot tell, at registration time, whether an opaque
//! handler finishes its work before returning or leaves a future behind that
//! may still fail. Rather than inspect anything at runtime, the answer is
//! fixed at construction:
//!
//! ```text
//! Handler::from_sync(f)    ← "produces its effects now"
//! Handler::from_async(f)   ← "produces a deferred outcome that may fail later"
//! ```
//!
//! Both variants erase the concrete function type behind an `Arc`, the same
//! trick routers use to store heterogeneous handlers in one table. The only
//! per-request cost is one `Arc` clone and one virtual call.
//!
//! [`wrap`] is the whole point of the crate: it leaves sync handlers alone
//! (same `Arc`, reference identity preserved) and turns an async handler into
//! one whose rejection is delivered to the [`Next`] continuation instead of
//! being dropped on the floor.

use std::future::Future;
use std::pin::Pin;
use std::ptr;
use std::sync::Arc;

use tracing::trace;

use crate::error::RouteError;
use crate::next::Next;

/// A heap-allocated, type-erased future resolving to a handler's outcome.
///
/// `Pin<Box<…>>` because the runtime must poll the future in place;
/// `Send + 'static` so executors may move it across threads.
pub type BoxFuture = Pin<Box<dyn Future<Output = Result<(), RouteError>> + Send + 'static>>;

type SyncFn<Req, Res> = dyn Fn(Req, Res, Next) + Send + Sync + 'static;

/// Internal dispatch interface for the async variant.
trait ErasedAsyncHandler<Req, Res>: Send + Sync {
    fn call(&self, req: Req, res: Res, next: Next) -> BoxFuture;
}

/// A request handler with the host framework's `(request, response, next)`
/// signature, tagged as synchronous or asynchronous at construction.
///
/// `Req` and `Res` are whatever request/response contexts the host hands its
/// handlers — this crate never looks inside them, it only passes them along.
/// Cloning is cheap (one `Arc` clone) and clones share identity, observable
/// via [`Handler::ptr_eq`].
pub struct Handler<Req, Res> {
    kind: Kind<Req, Res>,
}

enum Kind<Req, Res> {
    Sync(Arc<SyncFn<Req, Res>>),
    Async(Arc<dyn ErasedAsyncHandler<Req, Res>>),
}

impl<Req, Res> Clone for Handler<Req, Res> {
    fn clone(&self) -> Self {
        let kind = match &self.kind {
            Kind::Sync(f) => Kind::Sync(Arc::clone(f)),
            Kind::Async(h) => Kind::Async(Arc::clone(h)),
        };
        Self { kind }
    }
}

impl<Req, Res> Handler<Req, Res>
where
    Req: Send + 'static,
    Res: Send + 'static,
{
    /// Tags `f` as synchronous: it finishes its work before returning, so
    /// there is no deferred outcome for [`wrap`] to intercept. If it throws
    /// control to the error pipeline, it does so itself via [`Next::fail`].
    pub fn from_sync(f: impl Fn(Req, Res, Next) + Send + Sync + 'static) -> Self {
        Self { kind: Kind::Sync(Arc::new(f)) }
    }

    /// Tags `f` as asynchronous: it returns a future whose `Err` is the
    /// rejection [`wrap`] forwards to the continuation.
    ///
    /// Satisfied by any `async fn` with the signature:
    ///
    /// ```text
    /// async fn name(req: Req, res: Res, next: Next) -> Result<(), RouteError>
    /// ```
    pub fn from_async<F, Fut>(f: F) -> Self
    where
        F: Fn(Req, Res, Next) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), RouteError>> + Send + 'static,
    {
        Self { kind: Kind::Async(Arc::new(FnHandler(f))) }
    }

    /// Whether this handler carries a deferred outcome.
    pub fn is_async(&self) -> bool {
        matches!(self.kind, Kind::Async(_))
    }

    /// Whether two handlers share the same underlying function.
    ///
    /// [`wrap`] guarantees `wrap(sync).ptr_eq(&sync)` and
    /// `!wrap(async_).ptr_eq(&async_)`.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (&self.kind, &other.kind) {
            (Kind::Sync(a), Kind::Sync(b)) => ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b)),
            (Kind::Async(a), Kind::Async(b)) => ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b)),
            _ => false,
        }
    }

    /// Invokes the handler.
    ///
    /// A sync handler runs eagerly — its effects are complete before this
    /// returns, and the returned future is already `Ok(())`. An async handler
    /// yields its boxed future; awaiting it settles the deferred outcome.
    pub fn call(&self, req: Req, res: Res, next: Next) -> BoxFuture {
        match &self.kind {
            Kind::Sync(f) => {
                f(req, res, next);
                Box::pin(std::future::ready(Ok(())))
            }
            Kind::Async(h) => h.call(req, res, next),
        }
    }
}

/// Wraps an async handler so a rejection reaches the continuation.
///
/// - **Sync handler**: returned unchanged, same `Arc`. There is nothing to
///   intercept and no wrapping overhead.
/// - **Async handler**: returns a new handler that awaits the original with
///   the same arguments; on `Ok` the continuation is never invoked, on
///   `Err(reason)` it invokes [`Next::fail`] exactly once with the verbatim
///   reason and resolves successfully. The rejection is never re-raised.
///
/// Wrapping twice is idempotent in effect: the outer layer observes an
/// infallible future, so one rejection still means one continuation call.
///
/// ```rust
/// use routeguard::{wrap, Handler};
///
/// let audit = Handler::<(), ()>::from_sync(|_req, _res, _next| {});
/// assert!(wrap(audit.clone()).ptr_eq(&audit));
/// ```
pub fn wrap<Req, Res>(handler: Handler<Req, Res>) -> Handler<Req, Res>
where
    Req: Send + 'static,
    Res: Send + 'static,
{
    match handler.kind {
        Kind::Sync(_) => handler,
        Kind::Async(inner) => Handler { kind: Kind::Async(Arc::new(Guarded(inner))) },
    }
}

// ── Concrete wrappers ─────────────────────────────────────────────────────────

/// Newtype bridging a concrete `Fn` to the trait-object world.
struct FnHandler<F>(F);

impl<Req, Res, F, Fut> ErasedAsyncHandler<Req, Res> for FnHandler<F>
where
    F: Fn(Req, Res, Next) -> Fut + Send + Sync,
    Fut: Future<Output = Result<(), RouteError>> + Send + 'static,
{
    fn call(&self, req: Req, res: Res, next: Next) -> BoxFuture {
        Box::pin((self.0)(req, res, next))
    }
}

/// The rejection-forwarding layer produced by [`wrap`].
struct Guarded<Req, Res>(Arc<dyn ErasedAsyncHandler<Req, Res>>);

impl<Req, Res> ErasedAsyncHandler<Req, Res> for Guarded<Req, Res>
where
    Req: Send + 'static,
    Res: Send + 'static,
{
    fn call(&self, req: Req, res: Res, next: Next) -> BoxFuture {
        let inner = Arc::clone(&self.0);
        Box::pin(async move {
            // The inner handler gets its own clone of `next` so it can still
            // pass control along itself; the wrapper only touches `next` on a
            // rejection, and then exactly once.
            if let Err(reason) = inner.call(req, res, next.clone()).await {
                trace!(error = %reason, "handler rejected, forwarding to continuation");
                next.fail(reason);
            }
            Ok(())
        })
    }
}

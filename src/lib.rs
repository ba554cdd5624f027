//! # routeguard
//!
//! Forwards async handler rejections into the host router's error pipeline.
//! Nothing more. Nothing less.
//!
//! ## The problem
//!
//! Frameworks that hand every handler a `(request, response, next)` triple
//! route errors through the `next` continuation. A handler that finishes its
//! work before returning can call `next` itself; a handler that leaves a
//! future behind cannot — by the time the future fails, the registration
//! call is long gone and the rejection evaporates. Every such route ends up
//! with the same try/forward boilerplate.
//!
//! routeguard is that boilerplate, written once:
//!
//! - [`wrap`] — given a [`Handler`], return it untouched if it is synchronous
//!   (same reference, zero overhead), or a variant that awaits it and hands
//!   any rejection to [`Next::fail`] if it is asynchronous.
//! - [`guard`] — decorate a router-like object (anything implementing
//!   [`Register`]) so every handler registered for a guarded verb passes
//!   through [`wrap`] automatically. The guarded verb set defaults to
//!   GET/POST/PUT/DELETE/PATCH and is configurable via [`Guard::with_verbs`].
//!
//! What routeguard intentionally does **not** do: routing, concurrency
//! control, error classification, retries, rendering. The rejection reason
//! travels verbatim to the continuation; what happens next is the host's
//! business.
//!
//! ## Quick start
//!
//! ```rust
//! use routeguard::{guard, Handler, Method, Next, Register, RouteError};
//!
//! // The host router — anything with verb-based registration. `Req` and
//! // `Res` are the host's own context types; routeguard never looks inside.
//! struct AppRouter {
//!     routes: Vec<(Method, String, Vec<Handler<(), ()>>)>,
//! }
//!
//! impl Register<(), ()> for AppRouter {
//!     type Output = ();
//!
//!     fn register(&mut self, method: Method, path: &str, handlers: Vec<Handler<(), ()>>) {
//!         self.routes.push((method, path.to_owned(), handlers));
//!     }
//! }
//!
//! async fn list_users(_req: (), _res: (), _next: Next) -> Result<(), RouteError> {
//!     // An Err here would have vanished; guarded, it reaches `next`.
//!     Ok(())
//! }
//!
//! let mut app = guard(AppRouter { routes: Vec::new() });
//! app.get("/users", [Handler::from_async(list_users)]);
//! ```
//!
//! A full hyper + matchit integration lives in `demos/hyper_router.rs`.

mod error;
mod guard;
mod handler;
mod next;
mod register;

pub use http::Method;

pub use error::RouteError;
pub use guard::{Guard, guard};
pub use handler::{BoxFuture, Handler, wrap};
pub use next::Next;
pub use register::Register;

//! A hyper host router guarded by routeguard.
//!
//! Run with:
//!   RUST_LOG=info cargo run --example hyper_router
//!
//! Try:
//!   curl http://localhost:3000/hello     # 200, sync audit + async handler
//!   curl http://localhost:3000/flaky     # 500 — the rejection reached `next`
//!
//! Without `guard`, the `/flaky` rejection would settle into a dropped future
//! and the client would see the empty default response.

use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::{Arc, Mutex};

use bytes::Bytes;
use http::{Method, Response, StatusCode};
use http_body_util::Full;
use hyper::body::Incoming;
use hyper::service::service_fn;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as ConnBuilder;
use tokio::net::TcpListener;
use tracing::{error, info};

use routeguard::{Guard, Handler, Next, Register, RouteError, guard};

// The host's request/response contexts. routeguard never looks inside them;
// the demo shares them across a handler chain the way the host sees fit.
type Req = Arc<http::request::Parts>;
type Res = Arc<Mutex<Response<Full<Bytes>>>>;

// ── Host router ───────────────────────────────────────────────────────────────

/// One radix tree per method, each route holding its handler chain.
struct AppRouter {
    routes: HashMap<Method, matchit::Router<Vec<Handler<Req, Res>>>>,
}

impl AppRouter {
    fn new() -> Self {
        Self { routes: HashMap::new() }
    }

    fn lookup(&self, method: &Method, path: &str) -> Option<Vec<Handler<Req, Res>>> {
        let tree = self.routes.get(method)?;
        Some(tree.at(path).ok()?.value.clone())
    }
}

impl Register<Req, Res> for AppRouter {
    type Output = ();

    fn register(&mut self, method: Method, path: &str, handlers: Vec<Handler<Req, Res>>) {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, handlers)
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
    }
}

// ── Handlers ──────────────────────────────────────────────────────────────────

// Sync: finishes before returning, so it passes control along itself.
fn audit(req: Req, _res: Res, next: Next) {
    info!(path = %req.uri.path(), "audit");
    next.proceed();
}

async fn hello(_req: Req, res: Res, _next: Next) -> Result<(), RouteError> {
    *res.lock().unwrap() = Response::new(Full::new(Bytes::from_static(b"hello\n")));
    Ok(())
}

// The rejection this demo exists to surface.
async fn flaky(_req: Req, _res: Res, _next: Next) -> Result<(), RouteError> {
    Err("upstream lookup failed".into())
}

// ── Dispatch ──────────────────────────────────────────────────────────────────

async fn dispatch(
    router: Arc<Guard<AppRouter>>,
    req: hyper::Request<Incoming>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let (parts, _body) = req.into_parts();
    let method = parts.method.clone();
    let path = parts.uri.path().to_owned();

    let Some(handlers) = router.get_ref().lookup(&method, &path) else {
        return Ok(status_response(StatusCode::NOT_FOUND));
    };

    let req = Arc::new(parts);
    let res: Res = Arc::new(Mutex::new(status_response(StatusCode::OK)));

    // The continuation: a failing `next` call swaps in the error rendering.
    let next = Next::new({
        let res = Arc::clone(&res);
        move |rejection| {
            if let Some(reason) = rejection {
                error!(error = %reason, "handler rejected");
                *res.lock().unwrap() = error_response(&reason);
            }
        }
    });

    for handler in &handlers {
        let _ = handler.call(Arc::clone(&req), Arc::clone(&res), next.clone()).await;
    }

    let out = std::mem::replace(&mut *res.lock().unwrap(), status_response(StatusCode::OK));
    Ok(out)
}

fn status_response(code: StatusCode) -> Response<Full<Bytes>> {
    let mut res = Response::new(Full::new(Bytes::new()));
    *res.status_mut() = code;
    res
}

fn error_response(reason: &RouteError) -> Response<Full<Bytes>> {
    let mut res = Response::new(Full::new(Bytes::from(format!("error: {reason}\n"))));
    *res.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
    res
}

// ── Server loop ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let mut app = guard(AppRouter::new());
    app.get("/hello", [Handler::from_sync(audit), Handler::from_async(hello)]);
    app.get("/flaky", [Handler::from_sync(audit), Handler::from_async(flaky)]);

    let app = Arc::new(app);
    let listener = TcpListener::bind("127.0.0.1:3000").await?;
    info!("listening on 127.0.0.1:3000");

    loop {
        let (stream, peer) = listener.accept().await?;
        let app = Arc::clone(&app);

        tokio::spawn(async move {
            let io = TokioIo::new(stream);
            let svc = service_fn(move |req| dispatch(Arc::clone(&app), req));

            if let Err(e) = ConnBuilder::new(TokioExecutor::new())
                .serve_connection(io, svc)
                .await
            {
                error!(peer = %peer, "connection error: {e}");
            }
        });
    }
}

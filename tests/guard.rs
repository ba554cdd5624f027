//! Decorator behaviour, driven through a recording stub router.

use std::sync::{Arc, Mutex};

use http::Method;
use routeguard::{Guard, Handler, Next, Register, RouteError, guard};

#[derive(Default)]
struct StubRouter {
    calls: Vec<(Method, String, Vec<Handler<(), ()>>)>,
}

impl Register<(), ()> for StubRouter {
    type Output = &'static str;

    fn register(
        &mut self,
        method: Method,
        path: &str,
        handlers: Vec<Handler<(), ()>>,
    ) -> &'static str {
        self.calls.push((method, path.to_owned(), handlers));
        "original return value"
    }
}

fn probe() -> (Next, Arc<Mutex<Vec<Option<RouteError>>>>) {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let next = Next::new({
        let calls = Arc::clone(&calls);
        move |rejection| calls.lock().unwrap().push(rejection)
    });
    (next, calls)
}

async fn resolves(_: (), _: (), _: Next) -> Result<(), RouteError> {
    Ok(())
}

async fn rejects(_: (), _: (), _: Next) -> Result<(), RouteError> {
    Err("boom".into())
}

#[test]
fn wraps_async_handlers_for_every_default_verb() {
    for method in [Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::PATCH] {
        let mut router = guard(StubRouter::default());
        let sync = Handler::from_sync(|_, _, _| {});
        let async1 = Handler::from_async(resolves);
        let async2 = Handler::from_async(resolves);

        let returned = router.register(
            method.clone(),
            "/route",
            vec![sync.clone(), async1.clone(), async2.clone()],
        );
        assert_eq!(returned, "original return value");

        let inner = router.into_inner();
        let (recorded, path, handlers) = &inner.calls[0];
        assert_eq!(*recorded, method);
        assert_eq!(path, "/route");

        // Sync handlers delegate by identity; async handlers arrive as
        // distinct wrapped values.
        assert!(handlers[0].ptr_eq(&sync));
        assert!(!handlers[1].ptr_eq(&async1));
        assert!(!handlers[2].ptr_eq(&async2));
        assert!(!handlers[1].ptr_eq(&handlers[2]));
    }
}

#[test]
fn verb_sugar_delegates_like_register() {
    let mut router = guard(StubRouter::default());
    let handler = Handler::from_async(resolves);
    assert_eq!(router.patch("/route", [handler.clone()]), "original return value");

    let inner = router.into_inner();
    assert_eq!(inner.calls[0].0, Method::PATCH);
    assert!(!inner.calls[0].2[0].ptr_eq(&handler));
}

#[test]
fn default_verb_set_includes_patch() {
    let router = guard(StubRouter::default());
    assert!(router.verbs().contains(&Method::PATCH));
}

#[test]
fn verbs_outside_the_set_delegate_untouched() {
    let mut router = Guard::with_verbs(StubRouter::default(), [Method::GET]);
    let handler = Handler::from_async(resolves);
    router.post("/route", [handler.clone()]);

    let inner = router.into_inner();
    assert!(inner.calls[0].2[0].ptr_eq(&handler));
}

#[tokio::test]
async fn guarded_registration_forwards_a_rejection() {
    let mut router = guard(StubRouter::default());
    router.get("/route", [Handler::from_async(rejects)]);

    let handlers = &router.get_ref().calls[0].2;
    let (next, calls) = probe();
    handlers[0].call((), (), next).await.unwrap();

    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].as_ref().unwrap().to_string(), "boom");
}

#[tokio::test]
async fn double_guarding_still_forwards_exactly_once() {
    let mut router = guard(guard(StubRouter::default()));
    router.get("/route", [Handler::from_async(rejects)]);

    let inner = router.into_inner().into_inner();
    let (next, calls) = probe();
    inner.calls[0].2[0].call((), (), next).await.unwrap();
    assert_eq!(calls.lock().unwrap().len(), 1);
}

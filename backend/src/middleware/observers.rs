//! Ordered request observers with a request-scoped trace identifier.
//!
//! An [`ObserverChain`] is an explicit list of [`RequestObserver`]s composed
//! when the application is built. For every request the chain runs each
//! observer in registration order, then hands the request on unchanged.
//!
//! The outermost chain also generates a UUID [`TraceId`], keeps it in
//! task-local storage while the rest of the pipeline runs and echoes it in a
//! `trace-id` response header. Nested chains (for example one wrapping a
//! single route) reuse the identifier already in scope.

use std::future::Future;
use std::rc::Rc;
use std::sync::Arc;
use std::task::{Context, Poll};

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, HeaderValue};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tokio::task_local;
use tracing::{error, info};
use uuid::Uuid;

/// Response header carrying the request trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";

task_local! {
    static TRACE_ID: TraceId;
}

/// Per-request trace identifier exposed via task-local storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceId(Uuid);

impl TraceId {
    fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the current trace identifier if one is in scope.
    pub fn current() -> Option<Self> {
        TRACE_ID.try_with(|id| *id).ok()
    }

    /// Execute the provided future with the supplied trace identifier in scope.
    pub async fn scope<Fut>(trace_id: TraceId, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        TRACE_ID.scope(trace_id, fut).await
    }
}

impl std::fmt::Display for TraceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Side-effect-only hook invoked before a request reaches its handler.
///
/// Observers see the request read-only and cannot stop the pipeline.
pub trait RequestObserver: Send + Sync {
    /// Short description identifying the observer in a chain.
    fn label(&self) -> &str;

    /// Inspect the inbound request.
    fn observe(&self, request: &ServiceRequest, trace_id: TraceId);
}

/// Logs the HTTP method of every inbound request.
#[derive(Debug, Default, Clone, Copy)]
pub struct MethodObserver;

impl RequestObserver for MethodObserver {
    fn label(&self) -> &str {
        "method"
    }

    fn observe(&self, request: &ServiceRequest, trace_id: TraceId) {
        info!(
            method = %request.method(),
            path = request.path(),
            %trace_id,
            "endpoint type"
        );
    }
}

/// Logs a fixed marker for every request it sees.
#[derive(Debug, Clone)]
pub struct MarkerObserver {
    marker: String,
}

impl MarkerObserver {
    /// Create an observer logging `marker`.
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
        }
    }

    /// The text this observer logs.
    pub fn marker(&self) -> &str {
        &self.marker
    }
}

impl RequestObserver for MarkerObserver {
    fn label(&self) -> &str {
        &self.marker
    }

    fn observe(&self, _request: &ServiceRequest, trace_id: TraceId) {
        info!(marker = %self.marker, %trace_id, "request marker");
    }
}

/// Middleware running an ordered list of [`RequestObserver`]s.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use koders::middleware::{MarkerObserver, MethodObserver, ObserverChain};
///
/// let chain = ObserverChain::new()
///     .with(MethodObserver)
///     .with(MarkerObserver::new("second middleware"));
/// assert_eq!(chain.len(), 2);
/// let _app = App::new().wrap(chain);
/// ```
#[derive(Clone, Default)]
pub struct ObserverChain {
    observers: Vec<Arc<dyn RequestObserver>>,
}

impl ObserverChain {
    /// Create an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an observer; it runs after every observer added before it.
    #[must_use]
    pub fn with(mut self, observer: impl RequestObserver + 'static) -> Self {
        self.observers.push(Arc::new(observer));
        self
    }

    /// Number of registered observers.
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    /// Observer labels in the order they run.
    pub fn labels(&self) -> Vec<&str> {
        self.observers.iter().map(|observer| observer.label()).collect()
    }

    /// True when no observer is registered.
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl<S, B> Transform<S, ServiceRequest> for ObserverChain
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = ObserverChainMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ObserverChainMiddleware {
            service: Rc::new(service),
            observers: self.observers.clone().into(),
        }))
    }
}

/// Service wrapper produced by [`ObserverChain`].
///
/// Applications should not use this type directly.
pub struct ObserverChainMiddleware<S> {
    service: Rc<S>,
    observers: Rc<[Arc<dyn RequestObserver>]>,
}

impl<S, B> Service<ServiceRequest> for ObserverChainMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let observers = Rc::clone(&self.observers);

        if let Some(trace_id) = TraceId::current() {
            return Box::pin(async move {
                run_observers(&observers, &req, trace_id);
                service.call(req).await
            });
        }

        let trace_id = TraceId::generate();
        Box::pin(TraceId::scope(trace_id, async move {
            run_observers(&observers, &req, trace_id);
            let mut res = service.call(req).await?;
            match HeaderValue::from_str(&trace_id.to_string()) {
                Ok(value) => {
                    res.response_mut()
                        .headers_mut()
                        .insert(HeaderName::from_static(TRACE_ID_HEADER), value);
                }
                Err(error) => {
                    error!(%error, %trace_id, "failed to encode trace identifier header");
                }
            }
            Ok(res)
        }))
    }
}

fn run_observers(observers: &[Arc<dyn RequestObserver>], req: &ServiceRequest, trace_id: TraceId) {
    for observer in observers {
        observer.observe(req, trace_id);
    }
}

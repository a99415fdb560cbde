//! Tracing middleware attaching a request-scoped context.
//!
//! Each incoming request receives a UUID `trace_id` plus a short description
//! of the request (method, path, query, client). Both live in task-local
//! storage so error translation can render them without threading the
//! request through every call.
//!
//! Tokio task-local variables are not inherited across spawned tasks. Use
//! [`RequestContext::scope`] when spawning new tasks to ensure the active
//! context propagates correctly.

use std::future::Future;
use std::task::{Context, Poll};

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, HeaderValue};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tokio::task_local;
use tracing::{debug, error};
use uuid::Uuid;

/// Response header carrying the request's trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";

const UNKNOWN_CLIENT: &str = "unknown";

task_local! {
    static REQUEST_CONTEXT: RequestContext;
}

/// Per-request trace identifier, read through [`RequestContext::trace_id`].
///
/// # Examples
/// ```
/// use users_api::middleware::RequestContext;
///
/// async fn handler() -> Option<String> {
///     RequestContext::current().map(|context| context.trace_id().to_string())
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceId(pub(crate) Uuid);

impl TraceId {
    #[rustfmt::skip]
    fn generate() -> Self { Self(Uuid::new_v4()) }
}

impl std::fmt::Display for TraceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How much of a failure error responses reveal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorVerbosity {
    /// Sanitised reason and the request path only.
    #[default]
    Terse,
    /// Raw failure text and the full request descriptor.
    Verbose,
}

/// Request facts captured before the handler runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    trace_id: TraceId,
    method: String,
    path: String,
    query: String,
    client: String,
    verbosity: ErrorVerbosity,
}

impl RequestContext {
    /// Capture the context of `req` under a fresh trace identifier.
    pub fn capture(req: &ServiceRequest, verbosity: ErrorVerbosity) -> Self {
        let client = req
            .connection_info()
            .realip_remote_addr()
            .map_or_else(|| UNKNOWN_CLIENT.to_owned(), str::to_owned);
        Self {
            trace_id: TraceId::generate(),
            method: req.method().to_string(),
            path: req.path().to_owned(),
            query: req.query_string().to_owned(),
            client,
            verbosity,
        }
    }

    /// Returns a copy of the context in scope, if any.
    pub fn current() -> Option<Self> {
        REQUEST_CONTEXT.try_with(Clone::clone).ok()
    }

    /// Execute the provided future with `context` in scope.
    pub async fn scope<Fut>(context: RequestContext, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        REQUEST_CONTEXT.scope(context, fut).await
    }

    /// Context for work that did not arrive through the middleware.
    #[cfg(test)]
    pub(crate) fn detached(path: impl Into<String>, verbosity: ErrorVerbosity) -> Self {
        Self {
            trace_id: TraceId::generate(),
            method: "GET".to_owned(),
            path: path.into(),
            query: String::new(),
            client: UNKNOWN_CLIENT.to_owned(),
            verbosity,
        }
    }

    #[rustfmt::skip]
    pub fn trace_id(&self) -> TraceId { self.trace_id }

    #[rustfmt::skip]
    pub fn verbosity(&self) -> ErrorVerbosity { self.verbosity }

    /// Path with the query string appended when one was sent.
    pub fn uri(&self) -> String {
        if self.query.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, self.query)
        }
    }

    /// Request descriptor rendered into error `details`.
    ///
    /// Terse: `uri=<path>`. Verbose:
    /// `uri=<path>[?query];method=<METHOD>;client=<peer>;trace=<id>`.
    pub fn describe(&self) -> String {
        match self.verbosity {
            ErrorVerbosity::Terse => format!("uri={}", self.path),
            ErrorVerbosity::Verbose => format!(
                "uri={};method={};client={};trace={}",
                self.uri(),
                self.method,
                self.client,
                self.trace_id
            ),
        }
    }
}

/// Tracing middleware attaching a [`RequestContext`] and adding a `trace-id`
/// header to every response.
///
/// Handlers can read the context via [`RequestContext::current`].
///
/// # Examples
/// ```
/// use actix_web::App;
/// use users_api::middleware::trace::{ErrorVerbosity, Trace};
///
/// let app = App::new().wrap(Trace::new(ErrorVerbosity::Verbose));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Trace {
    verbosity: ErrorVerbosity,
}

impl Trace {
    /// Middleware rendering errors at `verbosity`.
    #[rustfmt::skip]
    pub fn new(verbosity: ErrorVerbosity) -> Self { Self { verbosity } }
}

impl<S, B> Transform<S, ServiceRequest> for Trace
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TraceMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TraceMiddleware {
            service,
            verbosity: self.verbosity,
        }))
    }
}

/// Service wrapper produced by [`Trace`].
///
/// Applications should not use this type directly.
pub struct TraceMiddleware<S> {
    service: S,
    verbosity: ErrorVerbosity,
}

impl<S, B> Service<ServiceRequest> for TraceMiddleware<S>
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
        let context = RequestContext::capture(&req, self.verbosity);
        let trace_id = context.trace_id;
        debug!(%trace_id, method = %context.method, uri = %context.uri(), "request received");
        let fut = REQUEST_CONTEXT.sync_scope(context.clone(), || self.service.call(req));
        Box::pin(RequestContext::scope(context, async move {
            let mut res = fut.await?;
            match HeaderValue::from_str(&trace_id.to_string()) {
                Ok(value) => {
                    res.response_mut()
                        .headers_mut()
                        .insert(HeaderName::from_static(TRACE_ID_HEADER), value);
                }
                Err(error) => {
                    error!(
                        %error,
                        trace_id = %trace_id,
                        "failed to encode trace identifier header"
                    );
                }
            }
            Ok(res)
        }))
    }
}

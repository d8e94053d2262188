use crate::handler::{BoxHandler, Handler};
use crate::params::{QueryParams, RouteParams};
use crate::request::AugmentedRequest;
use crate::response::AugmentedResponse;
use crate::{BoxError, BoxFuture};

use std::fmt;
use std::sync::Arc;

use http::header::{HeaderValue, ALLOW};
use http::{Method, StatusCode};
use tracing::debug;

/// Dispatches on the request method. Unmapped methods get a `405 Method Not Allowed`.
///
/// ```
/// use linear_router::{AugmentedRequest, AugmentedResponse, ForMethod, QueryParams, RouteParams};
/// use std::convert::Infallible;
///
/// async fn get(_: AugmentedRequest, _: QueryParams, _: RouteParams) -> Result<AugmentedResponse, Infallible> {
///     Ok(AugmentedResponse::text("You performed a HTTP GET!"))
/// }
///
/// async fn post(_: AugmentedRequest, _: QueryParams, _: RouteParams) -> Result<AugmentedResponse, Infallible> {
///     Ok(AugmentedResponse::text("You performed a HTTP POST!"))
/// }
///
/// let endpoint = ForMethod::new().get(get).post(post);
/// ```
#[derive(Clone, Default)]
pub struct ForMethod {
    handlers: Vec<(Method, Arc<dyn Handler>)>,
}

/// Builds a [`ForMethod`] from `(method, handler)` pairs.
pub fn for_method<I>(mappings: I) -> ForMethod
where
    I: IntoIterator<Item = (Method, BoxHandler)>,
{
    mappings
        .into_iter()
        .fold(ForMethod::new(), |m, (method, h)| m.on(method, h))
}

impl ForMethod {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Maps `method` to `handler`. Mapping a method twice replaces the first handler.
    pub fn on(mut self, method: Method, handler: impl Handler + 'static) -> Self {
        let handler: Arc<dyn Handler> = Arc::new(handler);
        match self.handlers.iter_mut().find(|(m, _)| *m == method) {
            Some(slot) => slot.1 = handler,
            None => self.handlers.push((method, handler)),
        }
        self
    }

    pub fn methods(&self) -> impl Iterator<Item = &Method> {
        self.handlers.iter().map(|(m, _)| m)
    }

    fn find(&self, method: &Method) -> Option<&Arc<dyn Handler>> {
        self.handlers
            .iter()
            .find_map(|(m, h)| if m == method { Some(h) } else { None })
    }

    fn not_allowed(&self, req: &AugmentedRequest) -> AugmentedResponse {
        let body = format!("Method {} not allowed for {}", req.method(), req.uri().path());
        let allow = self
            .methods()
            .map(Method::as_str)
            .collect::<Vec<_>>()
            .join(", ");

        let mut res = AugmentedResponse::text(body).with_status(StatusCode::METHOD_NOT_ALLOWED);
        if let Ok(v) = HeaderValue::from_str(&allow) {
            res.headers_mut().insert(ALLOW, v);
        }
        res
    }
}

macro_rules! define_method {
    ($name:tt, $method:tt) => {
        pub fn $name(self, h: impl Handler + 'static) -> Self {
            self.on(Method::$method, h)
        }
    };
}

impl ForMethod {
    define_method!(get, GET);
    define_method!(post, POST);
    define_method!(put, PUT);
    define_method!(delete, DELETE);
    define_method!(head, HEAD);
    define_method!(options, OPTIONS);
    define_method!(connect, CONNECT);
    define_method!(patch, PATCH);
    define_method!(trace, TRACE);
}

impl Handler for ForMethod {
    fn call(
        &self,
        req: AugmentedRequest,
        query_params: QueryParams,
        route_params: RouteParams,
    ) -> BoxFuture<'static, Result<AugmentedResponse, BoxError>> {
        match self.find(req.method()) {
            Some(h) => h.call(req, query_params, route_params),
            None => {
                debug!(method = %req.method(), path = %req.uri().path(), "method not allowed");
                let res = self.not_allowed(&req);
                Box::pin(async move { Ok(res) })
            }
        }
    }
}

impl fmt::Debug for ForMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.methods()).finish()
    }
}

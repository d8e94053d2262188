use crate::handler::Handler;
use crate::params::{QueryParams, RouteParams};
use crate::request::{AugmentedRequest, RequestHead};
use crate::response::AugmentedResponse;
use crate::{BoxError, BoxFuture};

use std::fmt;
use std::sync::Arc;

use http::header::{HeaderName, HeaderValue};
use tracing::info;

/// One response transform. Returning `None` keeps the (possibly mutated) response,
/// `Some` replaces it.
pub type Transform =
    dyn Fn(&RequestHead, &mut AugmentedResponse) -> Option<AugmentedResponse> + Send + Sync;

/// An ordered list of response transforms that can wrap any number of handlers.
///
/// ```
/// use linear_router::{pipe, Pipe};
/// use http::header::{HeaderValue, CACHE_CONTROL};
///
/// let with_caching: Pipe = pipe![
///     |_, res| {
///         res.headers_mut().append(CACHE_CONTROL, HeaderValue::from_static("max-age=86400"));
///         None
///     },
///     |req, res| {
///         res.add_cookie("requested_path", req.pathname());
///         None
///     },
/// ];
/// ```
#[derive(Clone, Default)]
pub struct Pipe {
    transforms: Vec<Arc<Transform>>,
}

/// A handler followed by the transforms of a [`Pipe`].
#[derive(Clone)]
pub struct Piped<H> {
    handler: H,
    transforms: Arc<[Arc<Transform>]>,
}

impl Pipe {
    pub fn new() -> Self {
        Self {
            transforms: Vec::new(),
        }
    }

    /// Appends a transform, run after the ones already added.
    pub fn then<F>(mut self, f: F) -> Self
    where
        F: Fn(&RequestHead, &mut AugmentedResponse) -> Option<AugmentedResponse>
            + Send
            + Sync
            + 'static,
    {
        self.transforms.push(Arc::new(f));
        self
    }

    pub fn wrap<H: Handler>(&self, handler: H) -> Piped<H> {
        Piped {
            handler,
            transforms: self.transforms.clone().into(),
        }
    }

    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }
}

impl fmt::Debug for Pipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipe")
            .field("transforms", &self.transforms.len())
            .finish()
    }
}

impl<H: Handler> Handler for Piped<H> {
    fn call(
        &self,
        req: AugmentedRequest,
        query_params: QueryParams,
        route_params: RouteParams,
    ) -> BoxFuture<'static, Result<AugmentedResponse, BoxError>> {
        let head = req.head().clone();
        let fut = self.handler.call(req, query_params, route_params);
        let transforms = Arc::clone(&self.transforms);
        Box::pin(async move {
            let res = fut.await?;
            let res = transforms
                .iter()
                .fold(res, |mut acc, t| t(&head, &mut acc).unwrap_or(acc));
            Ok(res)
        })
    }
}

/// Builds a [`Pipe`] from transform closures, applied left to right.
#[macro_export]
macro_rules! pipe {
    [$($transform:expr),* $(,)?] => {
        $crate::Pipe::new()$(.then($transform))*
    };
}

/// Appends a header to every response.
pub fn insert_header(
    name: HeaderName,
    value: HeaderValue,
) -> impl Fn(&RequestHead, &mut AugmentedResponse) -> Option<AugmentedResponse> + Send + Sync + 'static
{
    move |_, res| {
        res.headers_mut().append(name.clone(), value.clone());
        None
    }
}

/// Queues a cookie on every response.
pub fn add_cookie(
    name: impl Into<String>,
    value: impl Into<String>,
) -> impl Fn(&RequestHead, &mut AugmentedResponse) -> Option<AugmentedResponse> + Send + Sync + 'static
{
    let (name, value) = (name.into(), value.into());
    move |_, res| {
        res.add_cookie(name.as_str(), value.as_str());
        None
    }
}

/// Logs method, path and status of every response.
pub fn trace_response(
) -> impl Fn(&RequestHead, &mut AugmentedResponse) -> Option<AugmentedResponse> + Send + Sync + 'static
{
    |req, res| {
        info!(method = %req.method(), path = %req.uri().path(), status = res.status().as_u16(), "response");
        None
    }
}

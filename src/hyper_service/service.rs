use crate::body::Body;
use crate::cookies::write_cookies;
use crate::pattern::{PathCompiler, WildcardCompiler};
use crate::response::AugmentedResponse;
use crate::router::{is_missing_route, Router};
use crate::{BoxError, BoxFuture};

use std::convert::Infallible;
use std::fmt;
use std::sync::Arc;
use std::task::{Context, Poll};

use http::StatusCode;
use hyper::service::Service;
use tracing::{error, info};

type Request = hyper::Request<hyper::Body>;
type Response = hyper::Response<hyper::Body>;

/// Turns a routing failure into the response sent to the client.
pub type ErrorHandler = dyn Fn(BoxError) -> AugmentedResponse + Send + Sync;

/// Serves a [`Router`] over hyper. Route misses become `404`, handler errors `500`.
pub struct RouterService<C = WildcardCompiler> {
    router: Router<C>,
    error_handler: Arc<ErrorHandler>,
}

/// The default [`ErrorHandler`]: `404` for a missing route, `500` for anything else,
/// with the error message as a plain text body.
pub fn error_response(err: BoxError) -> AugmentedResponse {
    let status = if is_missing_route(&err) {
        StatusCode::NOT_FOUND
    } else {
        error!(error = %err, "handler failed");
        StatusCode::INTERNAL_SERVER_ERROR
    };
    AugmentedResponse::text(err.to_string()).with_status(status)
}

impl<C: PathCompiler + 'static> RouterService<C> {
    pub fn new(router: Router<C>) -> Self {
        Self {
            router,
            error_handler: Arc::new(error_response),
        }
    }

    pub fn with_error_handler(
        mut self,
        f: impl Fn(BoxError) -> AugmentedResponse + Send + Sync + 'static,
    ) -> Self {
        self.error_handler = Arc::new(f);
        self
    }

    pub fn router(&self) -> &Router<C> {
        &self.router
    }
}

impl<C: PathCompiler + 'static> Router<C> {
    pub fn into_service(self) -> RouterService<C> {
        RouterService::new(self)
    }
}

impl<C: PathCompiler + 'static> Service<Request> for RouterService<C> {
    type Response = Response;
    type Error = Infallible;
    type Future = BoxFuture<'static, Result<Response, Infallible>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request) -> Self::Future {
        info!(method = %req.method(), uri = %req.uri(), "request");

        let fut = self.router.route(req.map(Body::from));
        let error_handler = Arc::clone(&self.error_handler);

        Box::pin(async move {
            let mut res = match fut.await {
                Ok(res) => res,
                Err(e) => error_handler(e),
            };
            if let Err(e) = write_cookies(&mut res) {
                res = error_response(e.into());
            }
            Ok(res.into_inner().map(hyper::Body::from))
        })
    }
}

impl<C> Clone for RouterService<C> {
    fn clone(&self) -> Self {
        Self {
            router: self.router.clone(),
            error_handler: Arc::clone(&self.error_handler),
        }
    }
}

impl<C> fmt::Debug for RouterService<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouterService")
            .field("router", &self.router)
            .finish()
    }
}

use crate::params::{QueryParams, RouteParams};
use crate::request::AugmentedRequest;
use crate::response::AugmentedResponse;
use crate::{BoxError, BoxFuture};

use std::future::Future;

/// A route handler.
///
/// `query_params` and `route_params` repeat what the request carries. A mounted
/// [`Router`](crate::Router) takes them as its forwarded state: the shared query and
/// the path segments left for it to match.
pub trait Handler: Send + Sync {
    fn call(
        &self,
        req: AugmentedRequest,
        query_params: QueryParams,
        route_params: RouteParams,
    ) -> BoxFuture<'static, Result<AugmentedResponse, BoxError>>;
}

pub type BoxHandler = Box<dyn Handler>;

impl Handler for BoxHandler {
    fn call(
        &self,
        req: AugmentedRequest,
        query_params: QueryParams,
        route_params: RouteParams,
    ) -> BoxFuture<'static, Result<AugmentedResponse, BoxError>> {
        Handler::call(&**self, req, query_params, route_params)
    }
}

impl<F, Fut, R, E> Handler for F
where
    F: Fn(AugmentedRequest, QueryParams, RouteParams) -> Fut + Send + Sync,
    Fut: Future<Output = Result<R, E>> + Send + 'static,
    R: Into<AugmentedResponse> + 'static,
    E: Into<BoxError> + 'static,
{
    fn call(
        &self,
        req: AugmentedRequest,
        query_params: QueryParams,
        route_params: RouteParams,
    ) -> BoxFuture<'static, Result<AugmentedResponse, BoxError>> {
        let fut = (self)(req, query_params, route_params);
        Box::pin(async move {
            match fut.await {
                Ok(r) => Ok(r.into()),
                Err(e) => Err(e.into()),
            }
        })
    }
}

/// Boxes a handler, for tables and method maps that mix handler types.
pub fn boxed(h: impl Handler + 'static) -> BoxHandler {
    Box::new(h)
}

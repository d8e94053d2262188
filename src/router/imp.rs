use super::core::dispatch;
use super::error::RouterError;
use super::table::RouteTable;
use super::{Inner, Router};

use crate::body::Body;
use crate::handler::Handler;
use crate::params::{QueryParams, RouteParams};
use crate::pattern::{PathCompiler, RoutePattern, WildcardCompiler};
use crate::request::AugmentedRequest;
use crate::response::AugmentedResponse;
use crate::{BoxError, BoxFuture};

use std::fmt;
use std::sync::Arc;

impl Router {
    pub fn new(table: RouteTable) -> Self {
        Self::with_compiler(table, WildcardCompiler)
    }
}

impl<C: PathCompiler + 'static> Router<C> {
    pub fn with_compiler(table: RouteTable, compiler: C) -> Self {
        Self {
            inner: Arc::new(Inner { table, compiler }),
        }
    }

    pub fn table(&self) -> &RouteTable {
        &self.inner.table
    }

    /// Routes an incoming request. This is the outermost router: the path and
    /// the query string are taken from the request URI.
    ///
    /// Fails with [`MissingRouteError`](super::MissingRouteError) if nothing matches,
    /// and with [`RouterError`] if the scan reaches a pattern that does not compile.
    /// Handler errors are returned as they are.
    pub fn route(
        &self,
        req: http::Request<Body>,
    ) -> BoxFuture<'static, Result<AugmentedResponse, BoxError>> {
        Box::pin(dispatch(Arc::clone(&self.inner), req.into(), None))
    }

    /// The first route matching `pathname` and its captures. Handlers are not run.
    ///
    /// Fails if the scan reaches a pattern that does not compile.
    pub fn lookup(
        &self,
        pathname: &str,
    ) -> Result<Option<(&RoutePattern, RouteParams)>, RouterError> {
        let found = self.inner.find(pathname)?;
        Ok(found.map(|(entry, params)| (entry.pattern(), params)))
    }

    /// Compiles every pattern now instead of on first lookup, reporting the first
    /// one that does not compile.
    pub fn precompile(&self) -> Result<(), RouterError> {
        for entry in &self.inner.table {
            entry.matcher(&self.inner.compiler)?;
        }
        Ok(())
    }
}

impl<C: PathCompiler + 'static> Handler for Router<C> {
    fn call(
        &self,
        req: AugmentedRequest,
        query_params: QueryParams,
        route_params: RouteParams,
    ) -> BoxFuture<'static, Result<AugmentedResponse, BoxError>> {
        let forwarded = Some((query_params, route_params));
        Box::pin(dispatch(Arc::clone(&self.inner), req, forwarded))
    }
}

impl<C> Clone for Router<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C> fmt::Debug for Router<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("table", &self.inner.table)
            .finish()
    }
}

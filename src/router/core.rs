use super::error::{MissingRouteError, RouterError};
use super::table::RouteEntry;
use super::Inner;

use crate::cookies::write_cookies;
use crate::params::{QueryParams, RouteParams};
use crate::pattern::PathCompiler;
use crate::request::{decode_path, AugmentedRequest};
use crate::response::AugmentedResponse;
use crate::BoxError;

use std::sync::Arc;

use tracing::{debug, trace};

impl<C: PathCompiler> Inner<C> {
    /// Scans the table in order. An entry whose pattern does not compile stops the
    /// scan with its error.
    pub(super) fn find(
        &self,
        pathname: &str,
    ) -> Result<Option<(&RouteEntry, RouteParams)>, RouterError> {
        for entry in &self.table {
            let re = entry.matcher(&self.compiler)?;
            trace!(pattern = %entry.pattern(), pathname, "trying route");
            if let Some(caps) = re.captures(pathname) {
                let params: RouteParams = caps
                    .iter()
                    .skip(1)
                    .map(|m| m.map_or("", |m| m.as_str()))
                    .collect();
                return Ok(Some((entry, params)));
            }
        }
        Ok(None)
    }
}

/// `forwarded` is `None` for the outermost router, otherwise the query params and
/// path segments handed down by the parent.
pub(super) async fn dispatch<C: PathCompiler>(
    inner: Arc<Inner<C>>,
    req: AugmentedRequest,
    forwarded: Option<(QueryParams, RouteParams)>,
) -> Result<AugmentedResponse, BoxError> {
    let (pathname, query_params) = match forwarded {
        Some((query_params, segments)) => (segments.to_sub_path(), query_params),
        None => (req.pathname().to_owned(), req.query_params().clone()),
    };

    let (handler, route_params) = match inner.find(&pathname)? {
        Some((entry, params)) => {
            debug!(pattern = %entry.pattern(), %pathname, ?params, "route matched");
            (Arc::clone(&entry.handler), params)
        }
        None => {
            debug!(%pathname, "no route matched");
            let requested = decode_path(req.uri().path()).into_owned();
            return Err(MissingRouteError::new(requested).into());
        }
    };

    let req = req.augment(pathname, query_params.clone(), route_params.clone());
    let mut res = handler.call(req, query_params, route_params).await?;

    write_cookies(&mut res)?;

    Ok(res)
}

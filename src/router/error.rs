use crate::BoxError;

/// No entry of the route table matched the path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("No match for {pathname}")]
pub struct MissingRouteError {
    pathname: String,
}

impl MissingRouteError {
    pub(super) fn new(pathname: String) -> Self {
        Self { pathname }
    }

    pub fn pathname(&self) -> &str {
        &self.pathname
    }
}

/// Whether a routing failure is a route miss rather than a handler error.
pub fn is_missing_route(err: &BoxError) -> bool {
    err.downcast_ref::<MissingRouteError>().is_some()
}

#[derive(Debug, thiserror::Error)]
#[error("invalid route pattern {pattern}: {source}")]
pub struct RouterError {
    pattern: String,
    #[source]
    source: regex::Error,
}

impl RouterError {
    pub(super) fn new(pattern: String, source: regex::Error) -> Self {
        Self { pattern, source }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

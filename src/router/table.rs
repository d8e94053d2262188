use super::error::RouterError;

use crate::handler::Handler;
use crate::pattern::{PathCompiler, RoutePattern};

use std::borrow::Cow;
use std::fmt;
use std::sync::{Arc, OnceLock};

use regex::Regex;
use tracing::warn;

/// Patterns and handlers, in match priority order.
#[derive(Default)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

pub struct RouteEntry {
    pattern: RoutePattern,
    matcher: OnceLock<Result<Regex, regex::Error>>,
    pub(super) handler: Arc<dyn Handler>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends a route. Earlier routes shadow later ones.
    pub fn route(
        mut self,
        pattern: impl Into<RoutePattern>,
        handler: impl Handler + 'static,
    ) -> Self {
        self.push(pattern, handler);
        self
    }

    pub fn push(&mut self, pattern: impl Into<RoutePattern>, handler: impl Handler + 'static) {
        self.entries.push(RouteEntry {
            pattern: pattern.into(),
            matcher: OnceLock::new(),
            handler: Arc::new(handler),
        })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RouteEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a RouteTable {
    type Item = &'a RouteEntry;
    type IntoIter = std::slice::Iter<'a, RouteEntry>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<P, H> FromIterator<(P, H)> for RouteTable
where
    P: Into<RoutePattern>,
    H: Handler + 'static,
{
    fn from_iter<I: IntoIterator<Item = (P, H)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (p, h) in iter {
            table.push(p, h);
        }
        table
    }
}

impl fmt::Debug for RouteTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|e| &e.pattern))
            .finish()
    }
}

impl RouteEntry {
    pub fn pattern(&self) -> &RoutePattern {
        &self.pattern
    }

    /// Compiled on first use. A compile error is kept and reported on every use.
    pub(super) fn matcher(&self, compiler: &dyn PathCompiler) -> Result<&Regex, RouterError> {
        self.matcher
            .get_or_init(|| {
                compiler.compile(&self.pattern).map(Cow::into_owned).map_err(|e| {
                    warn!(pattern = %self.pattern, error = %e, "route pattern does not compile");
                    e
                })
            })
            .as_ref()
            .map_err(|e| RouterError::new(self.pattern.to_string(), e.clone()))
    }
}

/// Builds a [`RouteTable`] from `pattern => handler` pairs.
///
/// ```
/// use linear_router::{route_table, AugmentedRequest, AugmentedResponse, QueryParams, RouteParams, Router};
/// use std::convert::Infallible;
///
/// async fn hello(req: AugmentedRequest, _: QueryParams, _: RouteParams) -> Result<AugmentedResponse, Infallible> {
///     let name = req.route_params().get(0).unwrap_or_default();
///     Ok(AugmentedResponse::text(format!("hello, {}!", name)))
/// }
///
/// let router = Router::new(route_table! {
///     "/hello/*" => hello,
/// });
/// ```
#[macro_export]
macro_rules! route_table {
    {$($pattern:expr => $handler:expr),* $(,)?} => {{
        let mut __table = $crate::RouteTable::new();
        $(__table.push($pattern, $handler);)*
        __table
    }};
}

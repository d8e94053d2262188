mod core;
mod error;
mod imp;
mod table;

pub use self::error::{is_missing_route, MissingRouteError, RouterError};
pub use self::table::{RouteEntry, RouteTable};

use crate::pattern::WildcardCompiler;

use std::sync::Arc;

/// Resolves requests against a [`RouteTable`], first match wins.
///
/// Cloning is cheap, clones share the table. A router is itself a
/// [`Handler`](crate::Handler), so it can be mounted in another router's table
/// under a pattern ending in `*`. The mounted router then matches the captured
/// segments instead of the request path.
pub struct Router<C = WildcardCompiler> {
    inner: Arc<Inner<C>>,
}

struct Inner<C> {
    table: RouteTable,
    compiler: C,
}

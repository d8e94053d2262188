//! An ordered URL router.
//!
//! A [`RouteTable`] maps path specs like `/api/*/items/*` (or raw regexes) to
//! [`Handler`]s. A [`Router`] scans it top to bottom, hands the first match the
//! request together with its query and wildcard captures, and turns pending cookies
//! into `Set-Cookie` headers. Routers are handlers themselves and nest under a
//! trailing `*`.
//!
//! [`Pipe`] stacks response transforms around a handler and [`ForMethod`] splits a
//! route by HTTP method.
//!
//! ```
//! use linear_router::{route_table, AugmentedRequest, AugmentedResponse, QueryParams, RouteParams, Router};
//! use std::convert::Infallible;
//!
//! async fn item(req: AugmentedRequest, _: QueryParams, _: RouteParams) -> Result<AugmentedResponse, Infallible> {
//!     let id = req.route_params().get(0).unwrap_or_default();
//!     Ok(AugmentedResponse::text(format!("item {}", id)))
//! }
//!
//! let api = Router::new(route_table! {
//!     "/items/*" => item,
//! });
//!
//! let router = Router::new(route_table! {
//!     "/api/*" => api,
//! });
//!
//! assert!(matches!(router.lookup("/api/items/42"), Ok(Some(_))));
//! ```

#![forbid(unsafe_code)]

mod body;
mod cookies;
mod handler;
mod method;
mod params;
mod pattern;
mod request;
mod response;
mod router;

pub mod pipe;

#[cfg(feature = "hyper-service")]
mod hyper_service;

pub use self::body::Body;
pub use self::cookies::{write_cookies, InvalidCookieError};
pub use self::handler::{boxed, BoxHandler, Handler};
pub use self::method::{for_method, ForMethod};
pub use self::params::{QueryParams, RouteParams};
pub use self::pattern::{compile_pattern, PathCompiler, RoutePattern, WildcardCompiler};
pub use self::pipe::{Pipe, Piped};
pub use self::request::{AugmentedRequest, RequestHead};
pub use self::response::AugmentedResponse;
pub use self::router::{
    is_missing_route, MissingRouteError, RouteEntry, RouteTable, Router, RouterError,
};

#[cfg(feature = "hyper-service")]
pub use self::hyper_service::{error_response, ErrorHandler, RouterService};

pub use http::Method;

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
pub type BoxError = Box<dyn StdError + Send + Sync>;

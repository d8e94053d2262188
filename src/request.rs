use crate::body::Body;
use crate::params::{QueryParams, RouteParams};

use std::borrow::Cow;

use http::{HeaderMap, Method, Uri, Version};
use percent_encoding::percent_decode_str;

/// Everything about a routed request except its body.
#[derive(Debug, Clone)]
pub struct RequestHead {
    method: Method,
    uri: Uri,
    version: Version,
    headers: HeaderMap,
    pathname: String,
    query_params: QueryParams,
    route_params: RouteParams,
}

/// The request handed to route handlers.
#[derive(Debug)]
pub struct AugmentedRequest {
    head: RequestHead,
    body: Body,
}

impl RequestHead {
    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The decoded path the current router matched against.
    ///
    /// Inside a mounted router this is the forwarded sub path.
    pub fn pathname(&self) -> &str {
        &self.pathname
    }

    pub fn query_params(&self) -> &QueryParams {
        &self.query_params
    }

    pub fn route_params(&self) -> &RouteParams {
        &self.route_params
    }
}

impl AugmentedRequest {
    pub fn head(&self) -> &RequestHead {
        &self.head
    }

    pub fn method(&self) -> &Method {
        &self.head.method
    }

    pub fn uri(&self) -> &Uri {
        &self.head.uri
    }

    pub fn version(&self) -> Version {
        self.head.version
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.head.headers
    }

    pub fn pathname(&self) -> &str {
        &self.head.pathname
    }

    pub fn query_params(&self) -> &QueryParams {
        &self.head.query_params
    }

    pub fn route_params(&self) -> &RouteParams {
        &self.head.route_params
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn into_body(self) -> Body {
        self.body
    }

    pub fn into_parts(self) -> (RequestHead, Body) {
        (self.head, self.body)
    }

    /// Rebuilds the request for one routing attempt.
    pub(crate) fn augment(
        mut self,
        pathname: String,
        query_params: QueryParams,
        route_params: RouteParams,
    ) -> Self {
        self.head.pathname = pathname;
        self.head.query_params = query_params;
        self.head.route_params = route_params;
        self
    }
}

impl From<http::Request<Body>> for AugmentedRequest {
    fn from(req: http::Request<Body>) -> Self {
        let (parts, body) = req.into_parts();
        let pathname = decode_path(parts.uri.path()).into_owned();
        let query_params = parts
            .uri
            .query()
            .map(QueryParams::parse)
            .unwrap_or_default();
        let head = RequestHead {
            method: parts.method,
            uri: parts.uri,
            version: parts.version,
            headers: parts.headers,
            pathname,
            query_params,
            route_params: RouteParams::new(),
        };
        Self { head, body }
    }
}

/// Percent-decodes a request path. Invalid UTF-8 leaves the path untouched.
pub(crate) fn decode_path(path: &str) -> Cow<'_, str> {
    match percent_decode_str(path).decode_utf8() {
        Ok(p) => p,
        Err(_) => Cow::Borrowed(path),
    }
}

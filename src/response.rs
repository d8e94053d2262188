use crate::body::Body;

use http::header::{HeaderName, HeaderValue, CONTENT_TYPE};
use http::{HeaderMap, StatusCode};

/// A handler's response plus cookies waiting to be written as `Set-Cookie` headers.
#[derive(Debug, Default)]
pub struct AugmentedResponse {
    inner: http::Response<Body>,
    cookies: Vec<(String, String)>,
}

impl AugmentedResponse {
    pub fn new(body: impl Into<Body>) -> Self {
        Self {
            inner: http::Response::new(body.into()),
            cookies: Vec::new(),
        }
    }

    /// A `text/plain` response.
    pub fn text(body: impl Into<String>) -> Self {
        Self::new(body.into()).with_header(
            CONTENT_TYPE,
            HeaderValue::from_static("text/plain; charset=utf-8"),
        )
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        *self.inner.status_mut() = status;
        self
    }

    /// Appends a header entry.
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.inner.headers_mut().append(name, value);
        self
    }

    pub fn with_cookies<I, K, V>(mut self, cookies: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.cookies
            .extend(cookies.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn add_cookie(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.cookies.push((name.into(), value.into()))
    }

    pub fn status(&self) -> StatusCode {
        self.inner.status()
    }

    pub fn status_mut(&mut self) -> &mut StatusCode {
        self.inner.status_mut()
    }

    pub fn headers(&self) -> &HeaderMap {
        self.inner.headers()
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        self.inner.headers_mut()
    }

    pub fn body(&self) -> &Body {
        self.inner.body()
    }

    pub fn body_mut(&mut self) -> &mut Body {
        self.inner.body_mut()
    }

    /// Cookies not yet written to the headers.
    pub fn cookies(&self) -> &[(String, String)] {
        &self.cookies
    }

    pub(crate) fn take_cookies(&mut self) -> Vec<(String, String)> {
        std::mem::take(&mut self.cookies)
    }

    /// Drops the response down to a plain `http::Response`. Pending cookies are lost,
    /// see [`write_cookies`](crate::write_cookies).
    pub fn into_inner(self) -> http::Response<Body> {
        self.inner
    }
}

impl From<http::Response<Body>> for AugmentedResponse {
    fn from(inner: http::Response<Body>) -> Self {
        Self {
            inner,
            cookies: Vec::new(),
        }
    }
}

impl From<&'static str> for AugmentedResponse {
    fn from(s: &'static str) -> Self {
        Self::new(s)
    }
}

impl From<String> for AugmentedResponse {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

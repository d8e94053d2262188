use crate::response::AugmentedResponse;

use http::header::{HeaderMap, HeaderValue, SET_COOKIE};
use tracing::trace;

/// A pending cookie that cannot be written as a `Set-Cookie` header.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid cookie {name:?}")]
pub struct InvalidCookieError {
    name: String,
}

impl InvalidCookieError {
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Moves the response's pending cookies into `Set-Cookie` headers.
///
/// A cookie whose name already has a `Set-Cookie` entry is skipped, so the first
/// writer of a name wins, including earlier cookies from the same pending list.
///
/// Fails on the first cookie whose name is not an RFC 6265 token or whose value
/// holds a forbidden octet. The pending list is drained either way.
pub fn write_cookies(res: &mut AugmentedResponse) -> Result<(), InvalidCookieError> {
    if res.cookies().is_empty() {
        return Ok(());
    }

    for (name, value) in res.take_cookies() {
        if has_set_cookie(res.headers(), &name) {
            trace!(cookie = %name, "cookie already set");
            continue;
        }
        if !is_token(&name) || !is_cookie_value(&value) {
            return Err(InvalidCookieError { name });
        }
        match HeaderValue::from_str(&format!("{}={}", name, value)) {
            Ok(v) => res.headers_mut().append(SET_COOKIE, v),
            Err(_) => return Err(InvalidCookieError { name }),
        };
    }
    Ok(())
}

fn has_set_cookie(headers: &HeaderMap, name: &str) -> bool {
    headers.get_all(SET_COOKIE).iter().any(|v| {
        v.to_str()
            .ok()
            .and_then(|s| s.strip_prefix(name))
            .map_or(false, |rest| rest.starts_with('='))
    })
}

// RFC 6265 section 4.1.1
fn is_token(s: &str) -> bool {
    const SEPARATORS: &[u8] = b"()<>@,;:\\\"/[]?={} \t";
    !s.is_empty()
        && s
            .bytes()
            .all(|b| b.is_ascii() && !b.is_ascii_control() && !SEPARATORS.contains(&b))
}

fn is_cookie_value(s: &str) -> bool {
    let s = s
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(s);
    s.bytes().all(|b| {
        matches!(b, 0x21 | 0x23..=0x2B | 0x2D..=0x3A | 0x3C..=0x5B | 0x5D..=0x7E)
    })
}

use std::borrow::Cow;
use std::fmt;

use regex::Regex;

const STAR: &str = "*";
const SLASH: char = '/';

/// Matches one inner segment. `/` is not part of the class.
const INNER_WILDCARD: &str = r"([a-zA-Z0-9_,.\-]+)";
/// Swallows everything after the last literal segment, including nothing.
/// `s` lets it cross a decoded `\n`.
const TERMINAL_WILDCARD: &str = "((?s:.*))";

/// A route key: either a human path spec such as `/api/*/items/*`,
/// or a regex supplied verbatim.
#[derive(Clone)]
pub enum RoutePattern {
    Spec(String),
    Regex(Regex),
}

impl fmt::Debug for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spec(s) => f.debug_tuple("Spec").field(s).finish(),
            Self::Regex(r) => f.debug_tuple("Regex").field(&r.as_str()).finish(),
        }
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spec(s) => f.write_str(s),
            Self::Regex(r) => write!(f, "/{}/", r.as_str()),
        }
    }
}

impl From<&str> for RoutePattern {
    fn from(s: &str) -> Self {
        Self::Spec(s.to_owned())
    }
}

impl From<String> for RoutePattern {
    fn from(s: String) -> Self {
        Self::Spec(s)
    }
}

impl From<Regex> for RoutePattern {
    fn from(r: Regex) -> Self {
        Self::Regex(r)
    }
}

/// Turns a [`RoutePattern`] into a matcher.
///
/// The router calls this lazily, once per table entry.
pub trait PathCompiler: Send + Sync {
    fn compile<'a>(&self, pattern: &'a RoutePattern) -> Result<Cow<'a, Regex>, regex::Error>;
}

/// The default compiler, see [`compile_pattern`].
#[derive(Debug, Default, Clone, Copy)]
pub struct WildcardCompiler;

impl PathCompiler for WildcardCompiler {
    fn compile<'a>(&self, pattern: &'a RoutePattern) -> Result<Cow<'a, Regex>, regex::Error> {
        compile_pattern(pattern)
    }
}

/// Compiles a path spec into an anchored regex.
///
/// A `*` segment becomes a capture group. Inner wildcards match one segment made of
/// `[a-zA-Z0-9_,.-]`. A wildcard in the last position matches anything, including
/// further slashes, and is optional together with its leading `/`.
/// Literal segments are copied as-is, so regex metacharacters must be escaped by the caller.
///
/// A [`RoutePattern::Regex`] is borrowed back unchanged.
pub fn compile_pattern(pattern: &RoutePattern) -> Result<Cow<'_, Regex>, regex::Error> {
    match pattern {
        RoutePattern::Regex(r) => Ok(Cow::Borrowed(r)),
        RoutePattern::Spec(spec) => Regex::new(&translate(spec)).map(Cow::Owned),
    }
}

fn translate(spec: &str) -> String {
    let parts: Vec<&str> = spec.split(SLASH).collect();
    let last = parts.len() - 1;

    let mut re = String::with_capacity(spec.len() + 16);
    re.push('^');
    for (i, &part) in parts.iter().enumerate() {
        if i > 0 {
            re.push(SLASH);
        }
        if part != STAR {
            re.push_str(part);
        } else if i == last {
            if i > 0 {
                re.push('?');
            }
            re.push_str(TERMINAL_WILDCARD);
        } else {
            re.push_str(INNER_WILDCARD);
        }
    }
    re.push_str("/?$");
    re
}

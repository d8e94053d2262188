use std::ops::Deref;
use std::str::FromStr;
use std::sync::Arc;

use smallvec::SmallVec;

/// Decoded query string pairs, in the order they appeared.
///
/// Parsed once by the outermost router and shared by every nested one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Arc<Vec<(String, String)>>,
}

impl QueryParams {
    pub fn parse(query: &str) -> Self {
        let pairs: Vec<(String, String)> = url::form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect();
        Self {
            pairs: Arc::new(pairs),
        }
    }

    /// First value for `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find_map(|(k, v)| if k == name { Some(v.as_str()) } else { None })
    }

    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.pairs
            .iter()
            .filter(move |(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn parse_value<T: FromStr>(&self, name: &str) -> Option<Result<T, T::Err>> {
        self.get(name).map(T::from_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for QueryParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let pairs: Vec<(String, String)> =
            iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        Self {
            pairs: Arc::new(pairs),
        }
    }
}

/// Wildcard captures of the matched pattern, left to right.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams {
    buf: SmallVec<[String; 4]>,
}

impl RouteParams {
    pub fn new() -> Self {
        Self {
            buf: SmallVec::new(),
        }
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.buf.get(index).map(String::as_str)
    }

    pub fn parse<T: FromStr>(&self, index: usize) -> Option<Result<T, T::Err>> {
        self.get(index).map(T::from_str)
    }

    /// The path a mounted router matches against: the captures joined by `/`.
    pub(crate) fn to_sub_path(&self) -> String {
        let mut path = String::from("/");
        for (i, part) in self.buf.iter().enumerate() {
            if i > 0 {
                path.push('/');
            }
            path.push_str(part);
        }
        path
    }
}

impl Deref for RouteParams {
    type Target = [String];
    fn deref(&self) -> &Self::Target {
        &*self.buf
    }
}

impl<S: Into<String>> FromIterator<S> for RouteParams {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            buf: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl IntoIterator for RouteParams {
    type Item = String;
    type IntoIter = smallvec::IntoIter<[String; 4]>;
    fn into_iter(self) -> Self::IntoIter {
        self.buf.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_params() {
        let q = QueryParams::parse("lol=rofl&rofl=lmao&lol=kek&name=a%20b+c&flag");

        assert_eq!(q.len(), 5);
        assert_eq!(q.get("lol"), Some("rofl"));
        assert_eq!(q.get_all("lol").collect::<Vec<_>>(), ["rofl", "kek"]);
        assert_eq!(q.get("name"), Some("a b c"));
        assert_eq!(q.get("flag"), Some(""));
        assert!(q.get("missing").is_none());
        assert!(QueryParams::parse("").is_empty());
    }

    #[test]
    fn route_params() {
        let p: RouteParams = vec!["42", "x/y"].into_iter().collect();

        assert_eq!(p.parse::<u32>(0), Some(Ok(42)));
        assert!(p.parse::<u32>(1).unwrap().is_err());
        assert!(p.get(2).is_none());
        assert_eq!(p.to_sub_path(), "/42/x/y");
        assert_eq!(RouteParams::new().to_sub_path(), "/");
    }
}

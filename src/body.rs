use crate::BoxError;

use std::fmt;
use std::pin::Pin;

use bytes::{Bytes, BytesMut};
use futures::stream::{Stream, TryStreamExt};

type BoxStream = Pin<Box<dyn Stream<Item = Result<Bytes, BoxError>> + Send>>;

/// Request or response payload.
pub enum Body {
    Empty,
    Full(Bytes),
    Stream(BoxStream),
}

impl Body {
    pub fn empty() -> Self {
        Self::Empty
    }

    pub fn wrap_stream<S, E>(stream: S) -> Self
    where
        S: Stream<Item = Result<Bytes, E>> + Send + 'static,
        E: Into<BoxError> + 'static,
    {
        Self::Stream(Box::pin(stream.map_err(Into::<BoxError>::into)))
    }

    /// The buffered bytes, if the body is not a stream.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Empty => Some(&[][..]),
            Self::Full(b) => Some(&b[..]),
            Self::Stream(_) => None,
        }
    }

    pub fn is_stream(&self) -> bool {
        matches!(self, Self::Stream(_))
    }

    /// Collects the whole body.
    pub async fn to_bytes(self) -> Result<Bytes, BoxError> {
        match self {
            Self::Empty => Ok(Bytes::new()),
            Self::Full(b) => Ok(b),
            Self::Stream(s) => {
                let buf = s
                    .try_fold(BytesMut::new(), |mut buf, chunk| async move {
                        buf.extend_from_slice(&chunk);
                        Ok(buf)
                    })
                    .await?;
                Ok(buf.freeze())
            }
        }
    }
}

impl Default for Body {
    fn default() -> Self {
        Self::Empty
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("Body::Empty"),
            Self::Full(b) => f.debug_tuple("Body::Full").field(b).finish(),
            Self::Stream(_) => f.write_str("Body::Stream(..)"),
        }
    }
}

impl From<Bytes> for Body {
    fn from(b: Bytes) -> Self {
        Self::Full(b)
    }
}

impl From<Vec<u8>> for Body {
    fn from(v: Vec<u8>) -> Self {
        Self::Full(v.into())
    }
}

impl From<String> for Body {
    fn from(s: String) -> Self {
        Self::Full(s.into())
    }
}

impl From<&'static str> for Body {
    fn from(s: &'static str) -> Self {
        Self::Full(Bytes::from_static(s.as_bytes()))
    }
}

impl From<()> for Body {
    fn from(_: ()) -> Self {
        Self::Empty
    }
}

#[cfg(feature = "hyper-service")]
impl From<hyper::Body> for Body {
    fn from(b: hyper::Body) -> Self {
        Self::wrap_stream(b)
    }
}

#[cfg(feature = "hyper-service")]
impl From<Body> for hyper::Body {
    fn from(b: Body) -> Self {
        match b {
            Body::Empty => hyper::Body::empty(),
            Body::Full(b) => hyper::Body::from(b),
            Body::Stream(s) => hyper::Body::wrap_stream(s),
        }
    }
}

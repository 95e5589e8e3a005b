//! The closed set of HTTP verbs the router dispatches on.

use std::fmt;
use thiserror::Error;

/// A supported HTTP method.
///
/// Method names convert case-sensitively: `"GET"` parses, `"get"` is an
/// [`UnsupportedMethod`] outcome, never a panic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    Head,
    Options,
    Connect,
    Patch,
    Trace,
}

/// The explicit "method not supported" outcome of converting a method name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unsupported http method: {name}")]
pub struct UnsupportedMethod {
    name: String,
}

impl UnsupportedMethod {
    /// Gets the rejected method name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Method {
    pub(crate) const COUNT: usize = 9;

    /// All supported methods, in table order.
    pub const ALL: [Method; Method::COUNT] = [
        Method::Get,
        Method::Post,
        Method::Put,
        Method::Delete,
        Method::Head,
        Method::Options,
        Method::Connect,
        Method::Patch,
        Method::Trace,
    ];

    /// Returns the upper-case method name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Head => "HEAD",
            Method::Options => "OPTIONS",
            Method::Connect => "CONNECT",
            Method::Patch => "PATCH",
            Method::Trace => "TRACE",
        }
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        match self {
            Method::Get => 0,
            Method::Post => 1,
            Method::Put => 2,
            Method::Delete => 3,
            Method::Head => 4,
            Method::Options => 5,
            Method::Connect => 6,
            Method::Patch => 7,
            Method::Trace => 8,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Method {
    type Error = UnsupportedMethod;

    fn try_from(name: &str) -> Result<Self, Self::Error> {
        match name {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            "PUT" => Ok(Method::Put),
            "DELETE" => Ok(Method::Delete),
            "HEAD" => Ok(Method::Head),
            "OPTIONS" => Ok(Method::Options),
            "CONNECT" => Ok(Method::Connect),
            "PATCH" => Ok(Method::Patch),
            "TRACE" => Ok(Method::Trace),
            _ => Err(UnsupportedMethod { name: name.to_owned() }),
        }
    }
}

impl TryFrom<&http::Method> for Method {
    type Error = UnsupportedMethod;

    fn try_from(method: &http::Method) -> Result<Self, Self::Error> {
        Method::try_from(method.as_str())
    }
}

impl From<Method> for http::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => http::Method::GET,
            Method::Post => http::Method::POST,
            Method::Put => http::Method::PUT,
            Method::Delete => http::Method::DELETE,
            Method::Head => http::Method::HEAD,
            Method::Options => http::Method::OPTIONS,
            Method::Connect => http::Method::CONNECT,
            Method::Patch => http::Method::PATCH,
            Method::Trace => http::Method::TRACE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Method, UnsupportedMethod};

    #[test]
    fn test_try_from_name() {
        assert_eq!(Method::try_from("GET"), Ok(Method::Get));
        assert_eq!(Method::try_from("PATCH"), Ok(Method::Patch));
    }

    #[test]
    fn test_try_from_name_is_case_sensitive() {
        let err = Method::try_from("get").unwrap_err();
        assert_eq!(err.name(), "get");
        assert!(Method::try_from("BREW").is_err());
    }

    #[test]
    fn test_http_conversions() {
        let method = Method::try_from(&http::Method::DELETE).unwrap();
        assert_eq!(method, Method::Delete);
        assert_eq!(http::Method::from(Method::Delete), http::Method::DELETE);
    }

    #[test]
    fn test_table_order_is_dense() {
        for (expected, method) in Method::ALL.into_iter().enumerate() {
            assert_eq!(method.index(), expected);
        }
    }

    #[test]
    fn test_unsupported_display() {
        let err = UnsupportedMethod { name: "BREW".to_owned() };
        assert_eq!(err.to_string(), "unsupported http method: BREW");
    }
}

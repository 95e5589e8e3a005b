//! Path patterns derived from the routes directory tree.
//!
//! A directory path like `blog/:slug` becomes a [`PathKey`] of [`Segment`]s,
//! where a `:`-prefixed directory name is a parameter segment that accepts any
//! single request path part. Keys match request paths by exact segment count,
//! never across depth.

use crate::error::RouteError;
use http::Uri;
use std::fmt;

/// A single pattern segment, derived from one directory name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Matches exactly this text.
    Literal(String),
    /// Matches any single non-empty path part, binding it to the name.
    Param(String),
}

impl Segment {
    /// Parses a raw directory name; a `:` prefix makes it a parameter
    /// (the name is the remainder and may be empty).
    pub fn parse(raw: &str) -> Self {
        match raw.strip_prefix(':') {
            Some(name) => Self::Param(name.to_owned()),
            None => Self::Literal(raw.to_owned()),
        }
    }

    /// Returns true if this segment accepts the given request path part.
    #[inline]
    pub fn accepts(&self, part: &str) -> bool {
        match self {
            Self::Literal(text) => text == part,
            Self::Param(_) => true,
        }
    }

    /// Returns true if this is a parameter segment.
    #[inline]
    pub fn is_param(&self) -> bool {
        matches!(self, Self::Param(_))
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(text) => f.write_str(text),
            Self::Param(name) => write!(f, ":{name}"),
        }
    }
}

/// An ordered segment sequence identifying one directory under the routes
/// root, used as a route pattern.
///
/// The root directory is the empty sequence and displays as `/`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PathKey {
    segments: Vec<Segment>,
}

impl PathKey {
    /// The routes-directory root.
    pub const ROOT: PathKey = PathKey { segments: Vec::new() };

    /// Parses a `/`-joined pattern such as `/blog/:slug`.
    pub fn parse(pattern: &str) -> Self {
        Self { segments: split_pathname(pattern).into_iter().map(Segment::parse).collect() }
    }

    /// Returns the key of the named child directory.
    pub(crate) fn child(&self, raw: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(Segment::parse(raw));
        Self { segments }
    }

    /// Gets the segments of this key.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns the segment count (the ancestor depth of the directory).
    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true for the root key.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns true when no segment is a parameter.
    pub fn is_literal(&self) -> bool {
        !self.segments.iter().any(Segment::is_param)
    }

    /// Counts the parameter segments of this key.
    pub fn param_count(&self) -> usize {
        self.segments.iter().filter(|segment| segment.is_param()).count()
    }

    /// Matches the key against normalized request path parts: segment counts
    /// must be equal and every segment must accept its part.
    pub fn matches(&self, parts: &[&str]) -> bool {
        self.segments.len() == parts.len() && self.segments.iter().zip(parts).all(|(segment, part)| segment.accepts(part))
    }

    /// Joined segment text without the leading slash, so the root key is the
    /// empty string. Used as the exact-lookup key for parameter-free keys.
    pub(crate) fn joined_text(&self) -> String {
        let mut text = String::new();
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                text.push('/');
            }
            match segment {
                Segment::Literal(literal) => text.push_str(literal),
                Segment::Param(name) => {
                    text.push(':');
                    text.push_str(name);
                }
            }
        }
        text
    }

    /// Extracts named parameters by re-walking this key's parameter segments
    /// against the URL's path parts positionally.
    ///
    /// Accepts absolute URLs and bare paths.
    ///
    /// # Example
    /// ```
    /// use micro_router::PathKey;
    ///
    /// let key = PathKey::parse("/blog/:slug");
    /// let params = key.params("http://example.com/blog/hello").unwrap();
    /// assert_eq!(params.get("slug"), Some("hello"));
    /// ```
    pub fn params<'key, 'url>(&'key self, url: &'url str) -> Result<Params<'key, 'url>, RouteError> {
        let Ok(uri) = url.parse::<Uri>() else {
            return Err(RouteError::invalid_url(url));
        };

        let parts = split_pathname(path_in(url, &uri));
        let mut pairs = Vec::new();
        for (i, segment) in self.segments.iter().enumerate() {
            if let Segment::Param(name) = segment {
                if let Some(value) = parts.get(i) {
                    pairs.push((name.as_str(), *value));
                }
            }
        }
        Ok(Params { pairs })
    }
}

impl fmt::Display for PathKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("/");
        }
        for segment in &self.segments {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}

/// Splits a pathname on `/`, discarding empty segments; `/` yields no parts.
pub(crate) fn split_pathname(pathname: &str) -> Vec<&str> {
    pathname.split('/').filter(|part| !part.is_empty()).collect()
}

/// Re-borrows the parsed [`Uri`]'s path out of the original URL string, so
/// parameter values keep the URL's lifetime instead of the `Uri`'s.
///
/// `Uri` keeps the path byte-for-byte, directly after the scheme and
/// authority when those are present; a synthesized path (for example `/` on
/// an authority-only URL) has no counterpart in the input and yields `""`.
fn path_in<'url>(url: &'url str, uri: &Uri) -> &'url str {
    let prefix = match (uri.scheme_str(), uri.authority()) {
        (Some(scheme), Some(authority)) => scheme.len() + "://".len() + authority.as_str().len(),
        (Some(scheme), None) => scheme.len() + ":".len(),
        _ => 0,
    };
    let rest = &url[prefix.min(url.len())..];
    if rest.starts_with(uri.path()) {
        &rest[..uri.path().len()]
    } else {
        ""
    }
}

/// Named path parameters extracted from a request URL.
///
/// Names borrow from the matched [`PathKey`], values from the request URL.
#[derive(Debug, Clone)]
pub struct Params<'key, 'url> {
    pairs: Vec<(&'key str, &'url str)>,
}

impl<'key, 'url> Params<'key, 'url> {
    /// Creates an empty parameter set.
    #[inline]
    pub fn empty() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Returns true if there are no parameters.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Returns the number of parameters.
    #[inline]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Gets the value bound to a parameter name.
    /// Returns None if the parameter doesn't exist.
    pub fn get(&self, name: impl AsRef<str>) -> Option<&'url str> {
        let name = name.as_ref();
        self.pairs.iter().find(|(key, _)| *key == name).map(|(_, value)| *value)
    }

    /// Iterates over (name, value) pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&'key str, &'url str)> + '_ {
        self.pairs.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::{split_pathname, PathKey, Segment};
    use crate::error::RouteError;

    #[test]
    fn test_segment_parse() {
        assert_eq!(Segment::parse("blog"), Segment::Literal("blog".to_owned()));
        assert_eq!(Segment::parse(":slug"), Segment::Param("slug".to_owned()));
        assert_eq!(Segment::parse(":"), Segment::Param(String::new()));
    }

    #[test]
    fn test_split_pathname() {
        assert_eq!(split_pathname("/blog/hello"), vec!["blog", "hello"]);
        assert_eq!(split_pathname("//blog//hello/"), vec!["blog", "hello"]);
        assert!(split_pathname("/").is_empty());
        assert!(split_pathname("").is_empty());
    }

    #[test]
    fn test_key_display() {
        assert_eq!(PathKey::ROOT.to_string(), "/");
        assert_eq!(PathKey::parse("/blog/:slug").to_string(), "/blog/:slug");
    }

    #[test]
    fn test_key_matches_exact_arity_only() {
        let key = PathKey::parse("/blog/:slug");
        assert!(key.matches(&["blog", "hello"]));
        assert!(!key.matches(&["blog"]));
        assert!(!key.matches(&["blog", "hello", "comments"]));
        assert!(!key.matches(&["news", "hello"]));
    }

    #[test]
    fn test_key_specificity_helpers() {
        let key = PathKey::parse("/blog/:slug/:page");
        assert_eq!(key.param_count(), 2);
        assert!(!key.is_literal());
        assert!(PathKey::parse("/blog/hello").is_literal());
    }

    #[test]
    fn test_params_from_absolute_url() {
        let key = PathKey::parse("/blog/:slug");
        let params = key.params("http://x/blog/hello").unwrap();
        assert_eq!(params.len(), 1);
        assert_eq!(params.get("slug"), Some("hello"));
    }

    #[test]
    fn test_params_from_bare_path() {
        let key = PathKey::parse("/blog/:slug/:page");
        let params = key.params("/blog/hello/2?utm=x").unwrap();
        assert_eq!(params.get("slug"), Some("hello"));
        assert_eq!(params.get("page"), Some("2"));
        assert_eq!(params.get("missing"), None);
    }

    #[test]
    fn test_params_empty_name() {
        let key = PathKey::parse("/files/:");
        let params = key.params("/files/report").unwrap();
        assert_eq!(params.get(""), Some("report"));
    }

    #[test]
    fn test_params_invalid_url() {
        let key = PathKey::parse("/blog/:slug");
        let err = key.params("http://exa mple.com/blog/a").unwrap_err();
        assert!(matches!(err, RouteError::InvalidUrl { .. }));
    }

    #[test]
    fn test_params_authority_only_url_has_no_parts() {
        let key = PathKey::parse("/:section");
        let params = key.params("http://example.com").unwrap();
        assert!(params.is_empty());
    }

    #[test]
    fn test_params_rejects_fragment_urls() {
        // http's Uri refuses fragments outright, so they surface as InvalidUrl
        let key = PathKey::parse("/blog/:slug");
        let err = key.params("http://x/blog/hello#section").unwrap_err();
        assert!(matches!(err, RouteError::InvalidUrl { .. }));
    }

    #[test]
    fn test_params_shorter_url_skips_missing_parts() {
        let key = PathKey::parse("/blog/:slug");
        let params = key.params("/blog").unwrap();
        assert!(params.is_empty());
    }
}

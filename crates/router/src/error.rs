use crate::method::Method;
use std::error::Error;
use std::io;
use thiserror::Error;

/// Errors raised while building the route index at startup.
///
/// Startup failure is returned to the caller, never a process exit, so an
/// embedding application can decide whether to abort or fall back.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("routes directory not found: `{path}`")]
    RootNotFound { path: String },

    #[error("failed to read directory `{path}`: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to load module `{path}`: {source}")]
    Load {
        path: String,
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
}

impl ScanError {
    pub fn root_not_found<S: ToString>(path: S) -> Self {
        Self::RootNotFound { path: path.to_string() }
    }

    pub fn io<S: ToString>(path: S, source: io::Error) -> Self {
        Self::Io { path: path.to_string(), source }
    }

    pub fn load<S: ToString>(path: S, source: Box<dyn Error + Send + Sync>) -> Self {
        Self::Load { path: path.to_string(), source }
    }
}

/// Errors raised while resolving a request against a built index.
#[derive(Debug, Error)]
pub enum RouteError {
    /// The not-found fallback was needed but no such module is indexed.
    /// Non-fatal; maps to a bare 404-class response upstream.
    #[error("unable to find the `{file}` page")]
    MissingPage { file: String },

    /// Both the matched route and the not-found route lack the requested
    /// method. An internal fault, mapped to a 500-class response upstream.
    #[error("no `{method}` handler for route `{route}`, and the not-found route has none either")]
    InvalidHandler { method: Method, route: String },

    /// The URL given to parameter extraction failed to parse.
    #[error("invalid request url: `{url}`")]
    InvalidUrl { url: String },
}

impl RouteError {
    pub fn missing_page<S: ToString>(file: S) -> Self {
        Self::MissingPage { file: file.to_string() }
    }

    pub fn invalid_handler<S: ToString>(method: Method, route: S) -> Self {
        Self::InvalidHandler { method, route: route.to_string() }
    }

    pub fn invalid_url<S: ToString>(url: S) -> Self {
        Self::InvalidUrl { url: url.to_string() }
    }
}

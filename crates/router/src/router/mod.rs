//! The router: resolves request pathnames against a built [`RouteIndex`].
//!
//! A [`Router`] owns its index outright; there is no process-wide state.
//! Building happens once at startup through [`RouterBuilder::new`], and
//! every request-time operation is a read-only lookup, so one router can be
//! shared across connections without locking.

mod layout;
mod matcher;

use crate::config::RouterOptions;
use crate::error::{RouteError, ScanError};
use crate::index::RouteIndex;
use crate::method::Method;
use crate::module::HandlerModule;
use crate::path::{split_pathname, Params, PathKey};
use crate::registry::ModuleLoader;
use crate::walker::{DirWalker, FsWalker};
use std::fmt;
use tracing::debug;

/// Resolves request pathnames to a route module and its layout chain.
#[derive(Debug)]
pub struct Router<H> {
    index: RouteIndex<H>,
    not_found_file: String,
}

/// Result of resolving a pathname: one route module plus the layout modules
/// that wrap it, ordered root to leaf.
///
/// The serving layer consumes the chain in reverse: iterate `layouts()` from
/// the back, each layout wrapping the previously produced output, with the
/// innermost layout receiving the route handler's raw output as its child.
/// Layouts without a handler for the request method are skipped.
#[derive(Debug)]
pub struct Resolved<'idx, H> {
    module: &'idx HandlerModule<H>,
    layouts: Vec<&'idx HandlerModule<H>>,
}

impl<H> Router<H> {
    /// Gets the underlying route index.
    pub fn index(&self) -> &RouteIndex<H> {
        &self.index
    }

    /// Resolves a request pathname to a route module and its layout chain.
    ///
    /// A pathname that matches no route resolves to the not-found route,
    /// whose layout chain comes purely from its own directory; if no
    /// not-found module is indexed that is a [`RouteError::MissingPage`].
    ///
    /// # Arguments
    /// * `pathname` - The request path, e.g. `/blog/hello`
    pub fn resolve(&self, pathname: &str) -> Result<Resolved<'_, H>, RouteError> {
        let parts = split_pathname(pathname);
        match self.index.match_route(&parts) {
            Some(module) => Ok(Resolved { module, layouts: self.index.layout_chain(module.key()) }),
            None => {
                debug!(pathname, "no route matched, falling back to the not-found route");
                let module = self.not_found()?;
                Ok(Resolved { module, layouts: self.index.layout_chain(module.key()) })
            }
        }
    }

    /// Gets the designated not-found route module.
    ///
    /// Its absence only surfaces here, at the moment the module is needed,
    /// never at startup.
    pub fn not_found(&self) -> Result<&HandlerModule<H>, RouteError> {
        self.index.not_found().ok_or_else(|| RouteError::missing_page(&self.not_found_file))
    }

    /// Looks up the handler for the request method on a resolved route,
    /// falling back to the not-found route's handler for the same method.
    ///
    /// If both tables lack the method the result is
    /// [`RouteError::InvalidHandler`], an internal fault the serving layer
    /// must surface, never a silent no-op. The fallback replaces only the
    /// handler; the resolved layout chain stays the matched route's chain.
    pub fn handler_for<'idx>(&'idx self, resolved: &Resolved<'idx, H>, method: Method) -> Result<&'idx H, RouteError> {
        if let Some(handler) = resolved.module.handler(method) {
            return Ok(handler);
        }
        if let Some(not_found) = self.index.not_found() {
            if let Some(handler) = not_found.handler(method) {
                debug!(%method, route = %resolved.module.key(), "method missing on route, using the not-found handler");
                return Ok(handler);
            }
        }
        Err(RouteError::invalid_handler(method, resolved.module.key().to_string()))
    }
}

impl<'idx, H> Resolved<'idx, H> {
    /// Gets the matched route module.
    pub fn module(&self) -> &'idx HandlerModule<H> {
        self.module
    }

    /// Gets the matched route's path key.
    pub fn key(&self) -> &'idx PathKey {
        self.module.key()
    }

    /// Gets the layout modules wrapping this route, root to leaf.
    pub fn layouts(&self) -> &[&'idx HandlerModule<H>] {
        &self.layouts
    }

    /// Extracts named path parameters from a request URL by re-walking the
    /// matched key positionally.
    pub fn params<'url>(&self, url: &'url str) -> Result<Params<'idx, 'url>, RouteError> {
        self.module.key().params(url)
    }
}

/// Builds a [`Router`] by scanning a routes tree at startup.
///
/// Every option has a setter mirroring a [`RouterOptions`] field; a custom
/// [`DirWalker`] replaces the default filesystem walker rooted at
/// `routes_dir`.
pub struct RouterBuilder {
    options: RouterOptions,
    walker: Option<Box<dyn DirWalker>>,
}

impl RouterBuilder {
    /// Creates a builder with default options and the default filesystem
    /// walker.
    ///
    /// The handler payload type is fixed by the loader given to
    /// [`RouterBuilder::build`], so the builder itself is not generic.
    pub fn new() -> Self {
        Self { options: RouterOptions::default(), walker: None }
    }

    /// Replaces the whole option set.
    pub fn options(mut self, options: RouterOptions) -> Self {
        self.options = options;
        self
    }

    /// Sets the routes tree root for the default filesystem walker.
    pub fn routes_dir(mut self, dir: impl Into<String>) -> Self {
        self.options.routes_dir = dir.into();
        self
    }

    /// Sets the stem identifying a route module.
    pub fn route_file(mut self, stem: impl Into<String>) -> Self {
        self.options.route_file = stem.into();
        self
    }

    /// Sets the stem identifying a layout module.
    pub fn layout_file(mut self, stem: impl Into<String>) -> Self {
        self.options.layout_file = stem.into();
        self
    }

    /// Sets the stem identifying the fallback route module.
    pub fn not_found_file(mut self, stem: impl Into<String>) -> Self {
        self.options.not_found_file = stem.into();
        self
    }

    /// Sets the stem identifying the always-applied outermost layout.
    pub fn template_file(mut self, stem: impl Into<String>) -> Self {
        self.options.template_file = stem.into();
        self
    }

    /// Sets the accepted module file extensions.
    pub fn extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the default filesystem walker.
    pub fn walker(mut self, walker: impl DirWalker + 'static) -> Self {
        self.walker = Some(Box::new(walker));
        self
    }

    /// Scans the tree and builds the router.
    pub fn build<H>(self, mut loader: impl ModuleLoader<H>) -> Result<Router<H>, ScanError> {
        let walker: Box<dyn DirWalker> = match self.walker {
            Some(walker) => walker,
            None => Box::new(FsWalker::new(&self.options.routes_dir)),
        };
        let index = RouteIndex::scan(&self.options, walker.as_ref(), &mut loader)?;
        Ok(Router { index, not_found_file: self.options.not_found_file })
    }
}

impl Default for RouterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RouterBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouterBuilder")
            .field("options", &self.options)
            .field("walker", &self.walker.as_ref().map(|_| "dyn DirWalker"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::{Router, RouterBuilder};
    use crate::error::RouteError;
    use crate::method::Method;
    use crate::module::{get, post};
    use crate::path::Segment;
    use crate::registry::ModuleRegistry;
    use crate::walker::MemoryWalker;

    fn site_router() -> Router<&'static str> {
        let walker = MemoryWalker::new([
            "index.tsx",
            "404.tsx",
            "route.tsx",
            "layout.tsx",
            "about/route.tsx",
            "blog/route.tsx",
            "blog/layout.tsx",
            "blog/hello/route.tsx",
            "blog/:slug/route.tsx",
            "blog/:slug/layout.tsx",
            "submit/route.tsx",
            "_internal/route.tsx",
        ]);
        let registry = ModuleRegistry::new()
            .register("index.tsx", get("template"))
            .register("404.tsx", get("missing"))
            .register("route.tsx", get("home"))
            .register("layout.tsx", get("root-layout"))
            .register("about/route.tsx", get("about"))
            .register("blog/route.tsx", get("blog"))
            .register("blog/layout.tsx", get("blog-layout"))
            .register("blog/hello/route.tsx", get("hello"))
            .register("blog/:slug/route.tsx", get("post"))
            .register("blog/:slug/layout.tsx", get("post-layout"))
            .register("submit/route.tsx", post("submit"));
        RouterBuilder::new().walker(walker).build(registry).unwrap()
    }

    #[test]
    fn test_resolve_root() {
        let router = site_router();
        let resolved = router.resolve("/").unwrap();
        assert_eq!(resolved.module().handler(Method::Get), Some(&"home"));
        let layouts: Vec<&str> = resolved.layouts().iter().map(|module| module.file()).collect();
        assert_eq!(layouts, vec!["index.tsx", "layout.tsx"]);
    }

    #[test]
    fn test_resolve_root_without_template() {
        let walker = MemoryWalker::new(["route.tsx"]);
        let registry = ModuleRegistry::new().register("route.tsx", get("home"));
        let router = RouterBuilder::new().walker(walker).build(registry).unwrap();

        let resolved = router.resolve("/").unwrap();
        assert_eq!(resolved.module().handler(Method::Get), Some(&"home"));
        assert!(resolved.layouts().is_empty());
    }

    #[test]
    fn test_exact_match_priority() {
        let router = site_router();
        assert_eq!(router.resolve("/blog/hello").unwrap().module().file(), "blog/hello/route.tsx");
        assert_eq!(router.resolve("/blog/world").unwrap().module().file(), "blog/:slug/route.tsx");
    }

    #[test]
    fn test_layout_chain_order_and_wrapping() {
        let router = site_router();
        let resolved = router.resolve("/blog/world").unwrap();

        let layouts: Vec<&str> = resolved.layouts().iter().map(|module| module.file()).collect();
        assert_eq!(layouts, vec!["index.tsx", "layout.tsx", "blog/layout.tsx", "blog/:slug/layout.tsx"]);

        // consumption contract: wrap leaf to root, innermost layout first
        let handler = router.handler_for(&resolved, Method::Get).unwrap();
        let mut output = (*handler).to_owned();
        for layout in resolved.layouts().iter().rev() {
            let Some(label) = layout.handler(Method::Get) else { continue };
            output = format!("{label}({output})");
        }
        assert_eq!(output, "template(root-layout(blog-layout(post-layout(post))))");
    }

    #[test]
    fn test_each_route_is_reachable_by_its_own_key() {
        let router = site_router();
        for module in router.index().routes() {
            let pathname: String = module
                .key()
                .segments()
                .iter()
                .map(|segment| match segment {
                    Segment::Literal(text) => format!("/{text}"),
                    Segment::Param(_) => "/value".to_owned(),
                })
                .collect();
            let pathname = if pathname.is_empty() { "/".to_owned() } else { pathname };
            let resolved = router.resolve(&pathname).unwrap();
            assert_eq!(resolved.module().key(), module.key(), "route {} unreachable", module.file());
        }
    }

    #[test]
    fn test_underscore_subtree_is_unreachable() {
        let router = site_router();
        let resolved = router.resolve("/_internal").unwrap();
        assert_eq!(resolved.module().file(), "404.tsx");
    }

    #[test]
    fn test_miss_resolves_to_not_found_with_root_layouts() {
        let router = site_router();
        let resolved = router.resolve("/contact").unwrap();
        assert_eq!(resolved.module().handler(Method::Get), Some(&"missing"));
        let layouts: Vec<&str> = resolved.layouts().iter().map(|module| module.file()).collect();
        assert_eq!(layouts, vec!["index.tsx", "layout.tsx"]);
    }

    #[test]
    fn test_miss_without_not_found_module() {
        let walker = MemoryWalker::new(["route.tsx"]);
        let registry = ModuleRegistry::new().register("route.tsx", get("home"));
        let router = RouterBuilder::new().walker(walker).build(registry).unwrap();

        let err = router.resolve("/contact").unwrap_err();
        assert!(matches!(err, RouteError::MissingPage { file } if file == "404"));
    }

    #[test]
    fn test_method_fallback_keeps_route_layouts() {
        let router = site_router();
        let resolved = router.resolve("/submit").unwrap();

        assert_eq!(router.handler_for(&resolved, Method::Post).unwrap(), &"submit");
        // GET falls back to the not-found handler, chain stays the route's
        assert_eq!(router.handler_for(&resolved, Method::Get).unwrap(), &"missing");
        let layouts: Vec<&str> = resolved.layouts().iter().map(|module| module.file()).collect();
        assert_eq!(layouts, vec!["index.tsx", "layout.tsx"]);
    }

    #[test]
    fn test_invalid_handler_when_both_tables_miss() {
        let router = site_router();
        let resolved = router.resolve("/submit").unwrap();
        let err = router.handler_for(&resolved, Method::Delete).unwrap_err();
        assert!(matches!(err, RouteError::InvalidHandler { method: Method::Delete, route } if route == "/submit"));
    }

    #[test]
    fn test_invalid_handler_without_not_found_module() {
        let walker = MemoryWalker::new(["submit/route.tsx"]);
        let registry = ModuleRegistry::new().register("submit/route.tsx", post("submit"));
        let router = RouterBuilder::new().walker(walker).build(registry).unwrap();

        let resolved = router.resolve("/submit").unwrap();
        assert!(matches!(router.handler_for(&resolved, Method::Get), Err(RouteError::InvalidHandler { .. })));
    }

    #[test]
    fn test_resolved_params() {
        let router = site_router();
        let resolved = router.resolve("/blog/world").unwrap();
        let params = resolved.params("http://example.com/blog/world").unwrap();
        assert_eq!(params.get("slug"), Some("world"));
    }

    #[test]
    fn test_configured_file_names() {
        let walker = MemoryWalker::new(["shell.rs", "page.rs", "docs/page.rs", "docs/wrap.rs", "missing.rs"]);
        let registry = ModuleRegistry::new()
            .register("shell.rs", get("shell"))
            .register("page.rs", get("home"))
            .register("docs/page.rs", get("docs"))
            .register("docs/wrap.rs", get("docs-wrap"))
            .register("missing.rs", get("missing"));
        let router = RouterBuilder::new()
            .walker(walker)
            .route_file("page")
            .layout_file("wrap")
            .template_file("shell")
            .not_found_file("missing")
            .extensions(["rs"])
            .build(registry)
            .unwrap();

        let resolved = router.resolve("/docs").unwrap();
        assert_eq!(resolved.module().handler(Method::Get), Some(&"docs"));
        let layouts: Vec<&str> = resolved.layouts().iter().map(|module| module.file()).collect();
        assert_eq!(layouts, vec!["shell.rs", "docs/wrap.rs"]);

        let miss = router.resolve("/nope").unwrap();
        assert_eq!(miss.module().file(), "missing.rs");
    }

    #[test]
    fn test_build_infers_handler_type_from_loader() {
        // no turbofish anywhere: the handler type flows from the registry
        let walker = MemoryWalker::new(["route.tsx"]);
        let registry = ModuleRegistry::new().register("route.tsx", get("home"));
        let router = RouterBuilder::new().walker(walker).build(registry).unwrap();
        assert_eq!(router.resolve("/").unwrap().module().handler(Method::Get), Some(&"home"));
    }

    #[test]
    fn test_router_types_are_debuggable() {
        let router = site_router();
        let resolved = router.resolve("/").unwrap();
        assert!(format!("{router:?}").contains("Router"));
        assert!(format!("{resolved:?}").contains("Resolved"));
        assert!(format!("{:?}", RouterBuilder::new()).contains("RouterBuilder"));
    }

    #[test]
    fn test_router_is_send_and_sync() {
        fn check_send_sync<T: Send + Sync>() {}
        check_send_sync::<Router<fn() -> String>>();
    }
}

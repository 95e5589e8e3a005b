//! Module loading seam and the bundled registration table.
//!
//! There is no dynamic loading: handler tables are registered up front,
//! keyed by root-relative file path, and the scan links each discovered
//! module file to its table through [`ModuleLoader`].

use crate::module::MethodTable;
use std::collections::HashMap;
use std::error::Error;
use thiserror::Error;

/// Turns a discovered module file into its method table.
///
/// Called once per classified file during the startup scan. Failures abort
/// the scan with [`ScanError::Load`](crate::ScanError::Load).
pub trait ModuleLoader<H> {
    /// Loads the table for a root-relative file path such as
    /// `blog/:slug/route.tsx`.
    fn load(&mut self, path: &str) -> Result<MethodTable<H>, Box<dyn Error + Send + Sync>>;
}

/// A [`ModuleLoader`] backed by an explicit registration table.
///
/// Every module the routes tree contains must be registered before the scan;
/// a discovered file with no registration fails the startup scan, which
/// catches a tree and registry that have drifted apart.
#[derive(Debug)]
pub struct ModuleRegistry<H> {
    modules: HashMap<String, MethodTable<H>>,
}

/// Raised when the scan discovers a module file nobody registered.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("no module registered for `{path}`")]
pub struct UnregisteredModule {
    path: String,
}

impl<H> ModuleRegistry<H> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self { modules: HashMap::new() }
    }

    /// Registers the table for a root-relative file path. A leading `/` is
    /// tolerated. Registering a path twice keeps the last table.
    pub fn register(mut self, path: impl AsRef<str>, table: MethodTable<H>) -> Self {
        self.modules.insert(normalize(path.as_ref()), table);
        self
    }

    /// Returns the number of registered modules.
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl<H> Default for ModuleRegistry<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> ModuleLoader<H> for ModuleRegistry<H> {
    fn load(&mut self, path: &str) -> Result<MethodTable<H>, Box<dyn Error + Send + Sync>> {
        self.modules
            .remove(&normalize(path))
            .ok_or_else(|| Box::new(UnregisteredModule { path: path.to_owned() }) as Box<dyn Error + Send + Sync>)
    }
}

fn normalize(path: &str) -> String {
    path.trim_start_matches('/').to_owned()
}

#[cfg(test)]
mod tests {
    use super::{ModuleLoader, ModuleRegistry};
    use crate::method::Method;
    use crate::module::get;

    #[test]
    fn test_register_and_load() {
        let mut registry = ModuleRegistry::new().register("route.tsx", get("home"));
        let table = registry.load("route.tsx").unwrap();
        assert_eq!(table.handler(Method::Get), Some(&"home"));
    }

    #[test]
    fn test_leading_slash_is_tolerated() {
        let mut registry = ModuleRegistry::new().register("/blog/route.tsx", get("blog"));
        assert!(registry.load("blog/route.tsx").is_ok());
    }

    #[test]
    fn test_unregistered_module() {
        let mut registry: ModuleRegistry<&str> = ModuleRegistry::new();
        let err = registry.load("blog/route.tsx").unwrap_err();
        assert_eq!(err.to_string(), "no module registered for `blog/route.tsx`");
    }

    #[test]
    fn test_load_consumes_the_registration() {
        let mut registry = ModuleRegistry::new().register("route.tsx", get("home"));
        assert_eq!(registry.len(), 1);
        registry.load("route.tsx").unwrap();
        assert!(registry.is_empty());
        assert!(registry.load("route.tsx").is_err());
    }
}

//! The startup scan that turns a routes directory tree into an immutable
//! route index.
//!
//! Indexing is a single-threaded blocking phase; any failure is returned to
//! the caller before a single request is served. The finished index is
//! shared read-only across requests and never mutated.

use crate::config::RouterOptions;
use crate::module::{HandlerModule, ModuleKind};
use crate::path::PathKey;
use crate::registry::ModuleLoader;
use crate::walker::DirWalker;
use crate::ScanError;
use std::collections::HashMap;
use std::io;
use tracing::{debug, info, warn};

/// The immutable mapping from [`PathKey`] to [`HandlerModule`], built once
/// at startup.
///
/// Route entries keep registration order (depth-first, walker order within a
/// directory). Literal keys additionally live in an exact-lookup map, and
/// parameterized keys are bucketed by segment count, so matching never scans
/// entries of the wrong arity. Layout entries are pre-sorted by ancestor
/// depth; chain assembly relies on that order, not on map iteration order.
#[derive(Debug)]
pub struct RouteIndex<H> {
    pub(crate) routes: Vec<HandlerModule<H>>,
    pub(crate) exact: HashMap<String, usize>,
    pub(crate) by_arity: HashMap<usize, Vec<usize>>,
    pub(crate) layouts: Vec<HandlerModule<H>>,
    pub(crate) template: Option<HandlerModule<H>>,
    pub(crate) not_found: Option<HandlerModule<H>>,
}

impl<H> RouteIndex<H> {
    /// Scans the walker's tree and links every classified module file
    /// through the loader.
    ///
    /// Returns a [`ScanError`] if the root is missing, a directory cannot be
    /// read, or a module fails to load.
    pub fn scan(
        options: &RouterOptions,
        walker: &dyn DirWalker,
        loader: &mut dyn ModuleLoader<H>,
    ) -> Result<Self, ScanError> {
        let mut indexer = Indexer {
            options,
            routes: Vec::new(),
            layouts: Vec::new(),
            template: None,
            not_found: None,
        };
        indexer.scan_dir(walker, loader, "", &PathKey::ROOT)?;

        let Indexer { routes, mut layouts, template, not_found, .. } = indexer;

        let mut exact = HashMap::new();
        let mut by_arity: HashMap<usize, Vec<usize>> = HashMap::new();
        for (i, module) in routes.iter().enumerate() {
            if module.key().is_literal() {
                exact.entry(module.key().joined_text()).or_insert(i);
            } else {
                by_arity.entry(module.key().len()).or_default().push(i);
            }
        }

        // stable sort keeps registration order within one depth
        layouts.sort_by_key(|module| module.key().len());

        info!(
            routes = routes.len(),
            layouts = layouts.len(),
            template = template.is_some(),
            not_found = not_found.is_some(),
            "route index built"
        );
        Ok(Self { routes, exact, by_arity, layouts, template, not_found })
    }

    /// Iterates the route modules in registration order.
    pub fn routes(&self) -> impl Iterator<Item = &HandlerModule<H>> {
        self.routes.iter()
    }

    /// Iterates the layout modules in ascending ancestor depth.
    pub fn layouts(&self) -> impl Iterator<Item = &HandlerModule<H>> {
        self.layouts.iter()
    }

    /// Gets the root template module, if one was indexed.
    pub fn template(&self) -> Option<&HandlerModule<H>> {
        self.template.as_ref()
    }

    /// Gets the not-found module, if one was indexed.
    pub fn not_found(&self) -> Option<&HandlerModule<H>> {
        self.not_found.as_ref()
    }

    /// Returns the total number of indexed modules.
    pub fn len(&self) -> usize {
        self.routes.len() + self.layouts.len() + usize::from(self.template.is_some()) + usize::from(self.not_found.is_some())
    }

    /// Returns true if nothing was indexed.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

struct Indexer<'opts, H> {
    options: &'opts RouterOptions,
    routes: Vec<HandlerModule<H>>,
    layouts: Vec<HandlerModule<H>>,
    template: Option<HandlerModule<H>>,
    not_found: Option<HandlerModule<H>>,
}

impl<H> Indexer<'_, H> {
    fn scan_dir(
        &mut self,
        walker: &dyn DirWalker,
        loader: &mut dyn ModuleLoader<H>,
        dir: &str,
        key: &PathKey,
    ) -> Result<(), ScanError> {
        let entries = match walker.read_dir(dir) {
            Ok(entries) => entries,
            Err(e) if dir.is_empty() && e.kind() == io::ErrorKind::NotFound => {
                return Err(ScanError::root_not_found(&self.options.routes_dir));
            }
            Err(e) => return Err(ScanError::io(dir, e)),
        };

        for entry in entries {
            if entry.name().starts_with('_') {
                debug!(dir, name = entry.name(), "skipping underscore-prefixed entry");
                continue;
            }

            let child = join(dir, entry.name());
            if entry.is_dir() {
                let child_key = key.child(entry.name());
                self.scan_dir(walker, loader, &child, &child_key)?;
            } else {
                self.classify_file(loader, entry.name(), child, key)?;
            }
        }
        Ok(())
    }

    fn classify_file(
        &mut self,
        loader: &mut dyn ModuleLoader<H>,
        name: &str,
        file: String,
        key: &PathKey,
    ) -> Result<(), ScanError> {
        let Some((stem, extension)) = name.rsplit_once('.') else {
            debug!(file, "skipping file without extension");
            return Ok(());
        };
        if !self.options.extensions.iter().any(|accepted| accepted == extension) {
            debug!(file, "skipping file with unaccepted extension");
            return Ok(());
        }

        let options = self.options;
        if stem == options.route_file {
            if self.routes.iter().any(|module| module.key() == key) {
                warn!(key = %key, file, "duplicate route module, keeping the first");
                return Ok(());
            }
            let table = loader.load(&file).map_err(|source| ScanError::load(&file, source))?;
            self.routes.push(HandlerModule::new(ModuleKind::Route, key.clone(), file, table));
        } else if stem == options.layout_file {
            if self.layouts.iter().any(|module| module.key() == key) {
                warn!(key = %key, file, "duplicate layout module, keeping the first");
                return Ok(());
            }
            let table = loader.load(&file).map_err(|source| ScanError::load(&file, source))?;
            self.layouts.push(HandlerModule::new(ModuleKind::Layout, key.clone(), file, table));
        } else if stem == options.template_file {
            if !key.is_empty() {
                debug!(file, "template module outside the root directory, skipping");
                return Ok(());
            }
            if self.template.is_some() {
                warn!(file, "duplicate template module, keeping the first");
                return Ok(());
            }
            let table = loader.load(&file).map_err(|source| ScanError::load(&file, source))?;
            self.template = Some(HandlerModule::new(ModuleKind::Layout, key.clone(), file, table));
        } else if stem == options.not_found_file {
            if !key.is_empty() {
                debug!(file, "not-found module outside the root directory, skipping");
                return Ok(());
            }
            if self.not_found.is_some() {
                warn!(file, "duplicate not-found module, keeping the first");
                return Ok(());
            }
            let table = loader.load(&file).map_err(|source| ScanError::load(&file, source))?;
            self.not_found = Some(HandlerModule::new(ModuleKind::Route, key.clone(), file, table));
        } else {
            debug!(file, "unrecognized module file, skipping");
        }
        Ok(())
    }
}

fn join(dir: &str, name: &str) -> String {
    if dir.is_empty() {
        name.to_owned()
    } else {
        format!("{dir}/{name}")
    }
}

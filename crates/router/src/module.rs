//! Handler modules: method-keyed handler tables tagged Route or Layout.

use crate::method::Method;
use crate::path::PathKey;

/// A method-keyed table of handlers of type `H`.
///
/// The router is generic over its handler payload; embedders register
/// whatever callable representation their serving layer executes.
#[derive(Debug)]
pub struct MethodTable<H> {
    handlers: [Option<H>; Method::COUNT],
}

impl<H> MethodTable<H> {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self { handlers: std::array::from_fn(|_| None) }
    }

    /// Sets the handler for a method, replacing any previous one.
    pub fn on(mut self, method: Method, handler: H) -> Self {
        self.handlers[method.index()] = Some(handler);
        self
    }

    /// Gets the handler for a method.
    #[inline]
    pub fn handler(&self, method: Method) -> Option<&H> {
        self.handlers[method.index()].as_ref()
    }

    /// Returns true if a handler exists for the method.
    #[inline]
    pub fn contains(&self, method: Method) -> bool {
        self.handlers[method.index()].is_some()
    }

    /// Returns true if the table holds no handlers.
    pub fn is_empty(&self) -> bool {
        self.handlers.iter().all(Option::is_none)
    }

    /// Iterates the methods that have a handler, in table order.
    pub fn methods(&self) -> impl Iterator<Item = Method> + '_ {
        Method::ALL.into_iter().filter(|method| self.contains(*method))
    }
}

impl<H> Default for MethodTable<H> {
    fn default() -> Self {
        Self::new()
    }
}

macro_rules! method_table {
    ($fn_name:ident, $variant:ident) => {
        #[doc = concat!("Creates a table holding a single ", stringify!($variant), " handler.")]
        pub fn $fn_name<H>(handler: H) -> MethodTable<H> {
            MethodTable::new().on(Method::$variant, handler)
        }
    };
}

method_table!(get, Get);
method_table!(post, Post);
method_table!(put, Put);
method_table!(delete, Delete);
method_table!(head, Head);
method_table!(options, Options);
method_table!(connect, Connect);
method_table!(patch, Patch);
method_table!(trace, Trace);

/// How a module file is classified by its filename stem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleKind {
    /// Terminal handler for its directory's path.
    Route,
    /// Wrapping handler for its directory's subtree.
    Layout,
}

/// A handler table bound to the directory that contributed it, tagged Route
/// or Layout by the originating filename.
#[derive(Debug)]
pub struct HandlerModule<H> {
    kind: ModuleKind,
    key: PathKey,
    file: String,
    table: MethodTable<H>,
}

impl<H> HandlerModule<H> {
    pub(crate) fn new(kind: ModuleKind, key: PathKey, file: String, table: MethodTable<H>) -> Self {
        Self { kind, key, file, table }
    }

    /// Gets the module classification.
    pub fn kind(&self) -> ModuleKind {
        self.kind
    }

    /// Gets the key of the directory this module was indexed under.
    pub fn key(&self) -> &PathKey {
        &self.key
    }

    /// Gets the root-relative file path the module was linked from.
    pub fn file(&self) -> &str {
        &self.file
    }

    /// Gets the method table.
    pub fn table(&self) -> &MethodTable<H> {
        &self.table
    }

    /// Gets the handler for a method.
    #[inline]
    pub fn handler(&self, method: Method) -> Option<&H> {
        self.table.handler(method)
    }
}

/// The explicit result shape a route handler produces.
///
/// `Direct` short-circuits the layout chain and goes straight to the client;
/// `Renderable` is wrapped by the resolved layouts, leaf to root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerOutcome<R, N> {
    /// A finished response, bypassing layouts.
    Direct(R),
    /// A renderable node to be wrapped by the layout chain.
    Renderable(N),
}

impl<R, N> HandlerOutcome<R, N> {
    /// Returns true for a finished response.
    pub fn is_direct(&self) -> bool {
        matches!(self, Self::Direct(_))
    }

    /// Returns true for a renderable node.
    pub fn is_renderable(&self) -> bool {
        matches!(self, Self::Renderable(_))
    }
}

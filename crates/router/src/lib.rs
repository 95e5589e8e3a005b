//! A file-system driven request router
//!
//! This crate resolves an incoming request path to a handler module and an
//! ordered chain of wrapping layout modules, driven entirely by a directory
//! convention: every directory under the routes root may contribute one
//! route module and one layout module, a `:`-prefixed directory name is a
//! path parameter, and a `_`-prefixed name excludes its whole subtree.
//!
//! The index is built once at startup by scanning the tree and linking each
//! discovered module file to a pre-registered handler table; afterwards it
//! is immutable and safe to share across concurrent requests without
//! locking. Resolution is two-pass: exact literal matches always win over
//! parameterized ones, and among parameterized candidates the one with the
//! fewest parameters wins.
//!
//! # Example
//!
//! ```
//! use micro_router::{get, MemoryWalker, Method, ModuleRegistry, RouterBuilder};
//!
//! let walker = MemoryWalker::new(["route.tsx", "blog/:slug/route.tsx", "404.tsx"]);
//! let registry = ModuleRegistry::new()
//!     .register("route.tsx", get("home"))
//!     .register("blog/:slug/route.tsx", get("post"))
//!     .register("404.tsx", get("missing"));
//!
//! let router = RouterBuilder::new().walker(walker).build(registry).unwrap();
//!
//! let resolved = router.resolve("/blog/hello").unwrap();
//! assert_eq!(router.handler_for(&resolved, Method::Get).unwrap(), &"post");
//! assert_eq!(resolved.params("http://example.com/blog/hello").unwrap().get("slug"), Some("hello"));
//! ```
//!
//! Handler tables are generic over their payload: register whatever callable
//! representation the surrounding serving layer executes. Transport, body
//! serialization and static files live in that layer, not here.

mod config;
mod error;
mod index;
mod method;
mod module;
mod path;
mod registry;
mod walker;

pub mod router;

pub use config::RouterOptions;
pub use error::{RouteError, ScanError};
pub use index::RouteIndex;
pub use method::{Method, UnsupportedMethod};
pub use module::{connect, delete, get, head, options, patch, post, put, trace};
pub use module::{HandlerModule, HandlerOutcome, MethodTable, ModuleKind};
pub use path::{Params, PathKey, Segment};
pub use registry::{ModuleLoader, ModuleRegistry, UnregisteredModule};
pub use router::{Resolved, Router, RouterBuilder};
pub use walker::{DirEntry, DirWalker, FsWalker, MemoryWalker};

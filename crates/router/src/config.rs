//! Router configuration: the directory convention the indexer scans by.

use serde::{Deserialize, Serialize};

/// Names the indexer recognizes while scanning the routes tree.
///
/// Every field has a default matching the stock convention, so a
/// deserialized empty table (or [`RouterOptions::default()`]) is fully
/// usable. Files are classified by exact stem match against these names,
/// with the extension taken from `extensions`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct RouterOptions {
    /// Root of the scanned tree, relative to the working directory.
    #[serde(default = "default_routes_dir")]
    pub routes_dir: String,
    /// Stem identifying a route module.
    #[serde(default = "default_route_file")]
    pub route_file: String,
    /// Stem identifying a layout module.
    #[serde(default = "default_layout_file")]
    pub layout_file: String,
    /// Stem identifying the fallback route module, root directory only.
    #[serde(default = "default_not_found_file")]
    pub not_found_file: String,
    /// Stem identifying the always-applied outermost layout, root directory only.
    #[serde(default = "default_template_file")]
    pub template_file: String,
    /// Accepted module file extensions.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

fn default_routes_dir() -> String {
    "routes".to_owned()
}

fn default_route_file() -> String {
    "route".to_owned()
}

fn default_layout_file() -> String {
    "layout".to_owned()
}

fn default_not_found_file() -> String {
    "404".to_owned()
}

fn default_template_file() -> String {
    "index".to_owned()
}

fn default_extensions() -> Vec<String> {
    vec!["tsx".to_owned()]
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            routes_dir: default_routes_dir(),
            route_file: default_route_file(),
            layout_file: default_layout_file(),
            not_found_file: default_not_found_file(),
            template_file: default_template_file(),
            extensions: default_extensions(),
        }
    }
}

//! Layout chain assembly: which layout modules wrap a matched route, and in
//! what order.

use crate::index::RouteIndex;
use crate::module::HandlerModule;
use crate::path::{PathKey, Segment};

impl<H> RouteIndex<H> {
    /// Collects the layout chain for a route key, ordered root to leaf.
    ///
    /// The root template (when indexed) always comes first. A layout applies
    /// when its key is no deeper than the route key and every literal
    /// segment equals the route key's segment at the same position;
    /// parameter segments accept positionally. The index's layout list is
    /// pre-sorted by depth, so the chain order is explicit, never an
    /// artifact of map iteration.
    pub(crate) fn layout_chain(&self, key: &PathKey) -> Vec<&HandlerModule<H>> {
        let mut chain = Vec::new();
        if let Some(template) = &self.template {
            chain.push(template);
        }
        for layout in &self.layouts {
            if layout.key().len() > key.len() {
                // depth-sorted list: everything from here on is too deep
                break;
            }
            if applies(layout.key(), key) {
                chain.push(layout);
            }
        }
        chain
    }
}

fn applies(layout: &PathKey, route: &PathKey) -> bool {
    layout.segments().iter().zip(route.segments()).all(|(layout_segment, route_segment)| {
        match (layout_segment, route_segment) {
            (Segment::Param(_), _) => true,
            (Segment::Literal(a), Segment::Literal(b)) => a == b,
            (Segment::Literal(_), Segment::Param(_)) => false,
        }
    })
}

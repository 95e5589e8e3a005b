//! Route matching against the index, in fixed two-pass priority: exact
//! literal match first, then the most specific parameterized match.

use crate::index::RouteIndex;
use crate::module::HandlerModule;

impl<H> RouteIndex<H> {
    /// Selects the route module for normalized request path parts.
    ///
    /// Pass one is an exact lookup over the literal keys. Pass two scans the
    /// parameterized keys of the same segment count; among those that match,
    /// the one with the fewest parameter segments wins, ties broken by
    /// registration order. Returns None on a miss.
    pub(crate) fn match_route(&self, parts: &[&str]) -> Option<&HandlerModule<H>> {
        if let Some(&i) = self.exact.get(&parts.join("/")) {
            return Some(&self.routes[i]);
        }

        let bucket = self.by_arity.get(&parts.len())?;
        let mut best: Option<(usize, usize)> = None;
        for &i in bucket {
            let key = self.routes[i].key();
            if !key.matches(parts) {
                continue;
            }
            let param_count = key.param_count();
            match best {
                Some((best_count, _)) if best_count <= param_count => {}
                _ => best = Some((param_count, i)),
            }
        }
        best.map(|(_, i)| &self.routes[i])
    }
}

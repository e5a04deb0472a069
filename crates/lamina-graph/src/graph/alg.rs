//! Helper algorithms over the host graph.

use super::Graph;
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::VecDeque;

/// Weakly connected components of the sub-graph induced by `ids`.
///
/// Components are listed in the order of their first member in `ids`, and each component
/// lists its members in breadth-first discovery order. Edges leaving `ids` are ignored.
pub fn components(g: &Graph, ids: &[&str]) -> Vec<Vec<String>> {
    let in_scope: FxHashSet<&str> = ids.iter().copied().collect();
    let mut adjacent: FxHashMap<&str, Vec<&str>> = FxHashMap::default();
    for &v in ids {
        for e in g.incident_edges(v) {
            let other = if e.source() == v {
                e.target()
            } else {
                e.source()
            };
            if other != v && in_scope.contains(other) {
                adjacent.entry(v).or_default().push(other);
            }
        }
    }

    let mut seen: FxHashSet<&str> = FxHashSet::default();
    let mut out: Vec<Vec<String>> = Vec::new();
    for &start in ids {
        if !seen.insert(start) {
            continue;
        }
        let mut comp: Vec<String> = Vec::new();
        let mut q: VecDeque<&str> = VecDeque::new();
        q.push_back(start);
        while let Some(v) = q.pop_front() {
            comp.push(v.to_string());
            for &n in adjacent.get(v).map(Vec::as_slice).unwrap_or_default() {
                if seen.insert(n) {
                    q.push_back(n);
                }
            }
        }
        out.push(comp);
    }
    out
}

//! Splits long edges into dummy chains and builds the `ranks` structure.
//!
//! After this runs every segment of the working model connects adjacent layers. The chain
//! links carry no weight of their own: each segment inherits the merge count of the
//! hierarchy edge it belongs to.

use crate::error::{Error, Result};
use crate::model::{HierarchyModel, NodeKind, Segment};

pub fn run(model: &mut HierarchyModel) -> Result<()> {
    let mut dummies: usize = 0;
    for idx in 0..model.edges.len() {
        let (source, target) = (model.edges[idx].source, model.edges[idx].target);
        let (Some(s_layer), Some(t_layer)) =
            (model.nodes[source.0].layer, model.nodes[target.0].layer)
        else {
            return Err(Error::CorruptModel {
                message: format!("edge {idx} connects an unlayered node"),
            });
        };
        if t_layer <= s_layer {
            return Err(Error::CorruptModel {
                message: format!("edge {idx} does not point to a lower layer"),
            });
        }

        let (lane, component) = model.nodes[source.0].block();
        let edge_id = model.edges[idx].id;
        let mut chain = Vec::with_capacity(t_layer - s_layer - 1);
        for layer in s_layer + 1..t_layer {
            let d = model.add_node(NodeKind::Dummy { edge: edge_id }, 0.0, 0.0);
            let node = &mut model.nodes[d.0];
            node.layer = Some(layer);
            node.lane = lane;
            node.component = component;
            chain.push(d);
            dummies += 1;
        }
        model.edges[idx].chain = chain;
    }

    build_ranks(model);
    build_segments(model);
    tracing::debug!(dummies, "normalized long edges");
    Ok(())
}

/// Fills `ranks` in arena order, then groups each rank by block with a stable sort.
fn build_ranks(model: &mut HierarchyModel) {
    let layers = model
        .nodes
        .iter()
        .filter_map(|n| n.layer)
        .max()
        .map_or(0, |l| l + 1);
    let mut ranks = vec![Vec::new(); layers];
    for n in &model.nodes {
        if let Some(l) = n.layer {
            ranks[l].push(n.id);
        }
    }
    for rank in &mut ranks {
        rank.sort_by_key(|id| model.nodes[id.0].block());
    }
    model.ranks = ranks;
}

fn build_segments(model: &mut HierarchyModel) {
    let mut upper = vec![Vec::new(); model.nodes.len()];
    let mut lower = vec![Vec::new(); model.nodes.len()];
    for edge in &model.edges {
        let weight = edge.weight() as f64;
        for pair in edge.path().windows(2) {
            let (a, b) = (pair[0], pair[1]);
            lower[a.0].push(Segment { node: b, weight });
            upper[b.0].push(Segment { node: a, weight });
        }
    }
    model.upper = upper;
    model.lower = lower;
}

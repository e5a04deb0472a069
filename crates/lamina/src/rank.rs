//! Layer Assigner: longest-path layering over the acyclic model.

use crate::error::{Error, Result};
use crate::model::HierarchyModel;

/// Assigns `layer(n) = 1 + max(layer(p))` over predecessors, 0 for nodes without any.
///
/// Fails with [`Error::CorruptModel`] when the model still contains a cycle.
pub fn run(model: &mut HierarchyModel) -> Result<()> {
    let Some(order) = model.topological_order() else {
        return Err(Error::CorruptModel {
            message: "edges still form a cycle after cycle removal".to_string(),
        });
    };

    for n in order {
        let layer = model.nodes[n.0]
            .connects_as_target
            .iter()
            .filter_map(|e| {
                let source = model.edges[e.0].source;
                model.nodes[source.0].layer
            })
            .map(|l| l + 1)
            .max()
            .unwrap_or(0);
        model.nodes[n.0].layer = Some(layer);
    }

    let max_layer = model.nodes.iter().filter_map(|n| n.layer).max();
    tracing::debug!(layers = max_layer.map_or(0, |l| l + 1), "layering finished");
    Ok(())
}

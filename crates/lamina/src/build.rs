//! Model Builder: translates the host graph into a fresh [`HierarchyModel`].

use crate::config::LayoutConfig;
use crate::coordinate_system;
use crate::error::{Error, Result};
use crate::model::{EdgeId, HierarchyModel, MergedEdge, NodeId, NodeKind};
use lamina_graph::{Graph, alg};
use rustc_hash::FxHashMap;

/// Builds the hierarchy model for the children of `parent` (or the top-level vertices).
///
/// Groups inside the scope are not laid out as nodes. With `config.swimlanes`, each child
/// group of `parent` is a lane and its children become the nodes of that lane; non-group
/// children of `parent`, including groups left without children, are collected into one
/// trailing lane without geometry.
pub fn build(graph: &Graph, parent: Option<&str>, config: &LayoutConfig) -> Result<HierarchyModel> {
    if let Some(p) = parent {
        if !graph.has_vertex(p) {
            return Err(Error::UnknownParent { id: p.to_string() });
        }
    }

    let mut model = HierarchyModel::default();
    let scope = collect_scope(graph, parent, config, &mut model.lanes);

    for (cell, lane) in &scope {
        let Some(vertex) = graph.vertex(cell) else {
            return Err(Error::UnknownVertex {
                id: (*cell).to_string(),
            });
        };
        let geo = vertex.geometry();
        let width = sanitize_size(cell, "width", geo.width);
        let height = sanitize_size(cell, "height", geo.height);
        let (cross, along) = coordinate_system::canonical_size(config.orientation, width, height);
        let id = model.add_node(
            NodeKind::Vertex {
                cell: (*cell).to_string(),
            },
            cross,
            along,
        );
        model.nodes[id.0].lane = *lane;
    }

    add_edges(graph, &mut model);

    let cells: Vec<&str> = scope.iter().map(|(cell, _)| *cell).collect();
    for (index, component) in alg::components(graph, &cells).iter().enumerate() {
        for cell in component {
            if let Some(n) = model.node_of(cell) {
                model.nodes[n.0].component = index;
            }
        }
    }

    model.roots = find_roots(&model, config)?;

    tracing::debug!(
        nodes = model.nodes.len(),
        edges = model.edges.len(),
        roots = model.roots.len(),
        lanes = model.lanes.len(),
        "built hierarchy model"
    );
    Ok(model)
}

fn collect_scope<'g>(
    graph: &'g Graph,
    parent: Option<&str>,
    config: &LayoutConfig,
    lanes: &mut Vec<String>,
) -> Vec<(&'g str, usize)> {
    let children: Vec<&'g str> = graph.children(parent);

    if !config.swimlanes {
        return children
            .into_iter()
            .filter(|c| {
                let group = graph.is_group(c);
                if group {
                    tracing::debug!(group = %c, "skipping nested group");
                }
                !group
            })
            .map(|c| (c, 0))
            .collect();
    }

    let mut scope: Vec<(&'g str, usize)> = Vec::new();
    let mut loose: Vec<&'g str> = Vec::new();
    for c in children {
        if graph.is_group(c) {
            let lane = lanes.len();
            lanes.push(c.to_string());
            scope.extend(
                graph
                    .children(Some(c))
                    .into_iter()
                    .filter(|cell| !graph.is_group(cell))
                    .map(|cell| (cell, lane)),
            );
        } else {
            tracing::debug!(cell = %c, "childless cell placed in the trailing lane");
            loose.push(c);
        }
    }
    let trailing = lanes.len();
    scope.extend(loose.into_iter().map(|c| (c, trailing)));
    scope
}

fn sanitize_size(cell: &str, axis: &str, value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        return value;
    }
    tracing::warn!(vertex = %cell, axis, value, "missing vertex size, using 0");
    0.0
}

fn add_edges(graph: &Graph, model: &mut HierarchyModel) {
    // Parallel edges are merged per unordered pair; the first edge fixes the direction.
    let mut pairs: FxHashMap<(NodeId, NodeId), EdgeId> = FxHashMap::default();

    for edge in graph.edges() {
        let (Some(s), Some(t)) = (model.node_of(edge.source()), model.node_of(edge.target()))
        else {
            tracing::debug!(edge = %edge.id(), "edge leaves the layout scope");
            continue;
        };
        if s == t {
            tracing::warn!(edge = %edge.id(), "self-loop excluded from the hierarchy");
            continue;
        }

        let key = if s < t { (s, t) } else { (t, s) };
        match pairs.get(&key) {
            Some(&existing) => {
                let reversed = model.edge(existing).source != s;
                model.merge_into(
                    existing,
                    MergedEdge {
                        cell: edge.id().to_string(),
                        reversed,
                    },
                );
            }
            None => {
                let id = model.add_edge(
                    s,
                    t,
                    MergedEdge {
                        cell: edge.id().to_string(),
                        reversed: false,
                    },
                );
                pairs.insert(key, id);
            }
        }
    }
}

fn find_roots(model: &HierarchyModel, config: &LayoutConfig) -> Result<Vec<NodeId>> {
    if let Some(roots) = &config.roots {
        return roots
            .iter()
            .map(|cell| {
                model
                    .node_of(cell)
                    .ok_or_else(|| Error::UnknownVertex { id: cell.clone() })
            })
            .collect();
    }

    let roots = model
        .nodes
        .iter()
        .filter(|n| {
            n.connects_as_target.iter().all(|e| {
                let source = model.edge(*e).source;
                config.swimlanes && model.node(source).lane != n.lane
            })
        })
        .map(|n| n.id)
        .collect();
    Ok(roots)
}

//! Cycle Remover: inverts DFS back edges so the model becomes a DAG.
//!
//! The DFS starts from the model roots. Nodes it cannot reach (root-less or strongly
//! connected components) are visited by a second pass in arena order, which is the host
//! enumeration order, so every node is visited exactly once.

use crate::model::{EdgeId, HierarchyModel, NodeId};

pub fn run(model: &mut HierarchyModel) {
    let mut seen = vec![false; model.nodes.len()];
    let mut inverted: usize = 0;

    let roots = model.roots.clone();
    inverted += visit(model, &roots, &mut seen);

    let unseen: Vec<NodeId> = model
        .nodes
        .iter()
        .filter(|n| !seen[n.id.0])
        .map(|n| n.id)
        .collect();
    if !unseen.is_empty() {
        tracing::debug!(unseen = unseen.len(), "visiting nodes unreachable from roots");
        inverted += visit(model, &unseen, &mut seen);
    }

    tracing::debug!(inverted, "cycle removal finished");
}

struct Frame {
    node: NodeId,
    outgoing: Vec<EdgeId>,
    next: usize,
}

/// Depth-first traversal from each unseen start node; returns the number of inverted edges.
fn visit(model: &mut HierarchyModel, starts: &[NodeId], seen: &mut [bool]) -> usize {
    let mut inverted: usize = 0;
    let mut stack: Vec<Frame> = Vec::new();

    for &start in starts {
        if seen[start.0] {
            continue;
        }
        seen[start.0] = true;
        push(model, &mut stack, start);

        while let Some(frame) = stack.last_mut() {
            let Some(&edge) = frame.outgoing.get(frame.next) else {
                let done = frame.node;
                model.nodes[done.0].on_stack = false;
                stack.pop();
                continue;
            };
            frame.next += 1;

            let target = model.edges[edge.0].target;
            if model.nodes[target.0].on_stack {
                // The target is an ancestor of the current node.
                model.invert_edge(edge);
                inverted += 1;
            } else if !seen[target.0] {
                seen[target.0] = true;
                push(model, &mut stack, target);
            }
        }
    }

    inverted
}

fn push(model: &mut HierarchyModel, stack: &mut Vec<Frame>, node: NodeId) {
    let n = &mut model.nodes[node.0];
    n.on_stack = true;
    // Snapshot: inversions below rewrite the adjacency lists while we iterate.
    stack.push(Frame {
        node,
        outgoing: n.connects_as_source.clone(),
        next: 0,
    });
}

//! Coordinate Assigner.
//!
//! Works in the canonical frame (layers along +y, cross axis x). The stages, in order:
//!
//! 1. layer bands: every layer gets a band as thick as its tallest node, separated by
//!    `interRankCellSpacing`, and nodes are centred in their band;
//! 2. initial packing: each `(lane, component)` block gets its own column;
//! 3. priority placement sweeps, alternating down and up and ending with a downward sweep;
//! 4. compaction and optional fine tuning;
//! 5. swimlane bands, waypoints, and translation to the origin.

mod compact;
mod edges;
mod priority;

pub use compact::{compact, fine_tune};
pub use edges::route;
pub use priority::{DUMMY_PRIORITY, median_x, preferred_x};

use crate::config::LayoutConfig;
use crate::model::{HierarchyModel, NodeId, NodeKind};
use std::collections::BTreeMap;

pub fn run(model: &mut HierarchyModel, config: &LayoutConfig) {
    size_dummies(model, config);
    assign_bands(model, config);
    initial_packing(model, config);

    let sweeps = config.max_position_iterations;
    for i in 0..sweeps {
        let downward = (sweeps - 1 - i) % 2 == 0;
        priority::sweep(model, config, downward);
    }

    compact(model, config);
    if config.fine_tuning {
        fine_tune(model, config);
    }
    if config.swimlanes {
        place_lanes(model, config);
    }
    route(model, config);
    translate_to_origin(model);

    tracing::debug!(
        width = model.extent.0,
        height = model.extent.1,
        "coordinate assignment finished"
    );
}

/// Minimum centre distance between two neighbours of one layer.
pub fn separation(model: &HierarchyModel, config: &LayoutConfig, a: NodeId, b: NodeId) -> f64 {
    let (na, nb) = (model.node(a), model.node(b));
    let gap = if na.block() == nb.block() {
        config.intra_cell_spacing
    } else {
        config.inter_hierarchy_spacing
    };
    na.width / 2.0 + nb.width / 2.0 + gap
}

/// A dummy is as wide as the fan of the parallel edges running through it.
fn size_dummies(model: &mut HierarchyModel, config: &LayoutConfig) {
    for i in 0..model.nodes.len() {
        if let NodeKind::Dummy { edge } = model.nodes[i].kind {
            let fan = model.edges[edge.0].weight().saturating_sub(1) as f64;
            model.nodes[i].width = fan * config.parallel_edge_spacing;
        }
    }
}

fn assign_bands(model: &mut HierarchyModel, config: &LayoutConfig) {
    let mut bands = Vec::with_capacity(model.ranks.len());
    let mut top = 0.0;
    for rank in &model.ranks {
        let thickness = rank
            .iter()
            .map(|n| model.nodes[n.0].height)
            .fold(0.0, f64::max);
        bands.push((top, thickness));
        top += thickness + config.inter_rank_cell_spacing;
    }

    for (rank, (top, thickness)) in model.ranks.iter().zip(&bands) {
        for n in rank {
            model.nodes[n.0].y = top + thickness / 2.0;
        }
    }
    model.bands = bands;
}

/// Packs every block of every layer left to right and centres it in the block's column.
fn initial_packing(model: &mut HierarchyModel, config: &LayoutConfig) {
    let keys: Vec<(usize, usize)> = model.nodes.iter().map(|n| n.block()).collect();
    let same_block = |a: &NodeId, b: &NodeId| keys[a.0] == keys[b.0];

    let mut columns: BTreeMap<(usize, usize), f64> = BTreeMap::new();
    for rank in &model.ranks {
        for block in rank.chunk_by(same_block) {
            let width = packed_width(model, config, block);
            let column = columns.entry(keys[block[0].0]).or_insert(0.0);
            *column = column.max(width);
        }
    }

    let mut offsets: BTreeMap<(usize, usize), f64> = BTreeMap::new();
    let mut cursor = 0.0;
    for (key, width) in &columns {
        offsets.insert(*key, cursor);
        cursor += width + config.inter_hierarchy_spacing;
    }

    let ranks = model.ranks.clone();
    for rank in &ranks {
        for block in rank.chunk_by(same_block) {
            let key = keys[block[0].0];
            let column = columns.get(&key).copied().unwrap_or_default();
            let offset = offsets.get(&key).copied().unwrap_or_default();
            let mut x = offset
                + (column - packed_width(model, config, block)) / 2.0
                + model.node(block[0]).width / 2.0;
            model.nodes[block[0].0].x = x;
            for w in block.windows(2) {
                x += separation(model, config, w[0], w[1]);
                model.nodes[w[1].0].x = x;
            }
        }
    }
}

fn packed_width(model: &HierarchyModel, config: &LayoutConfig, block: &[NodeId]) -> f64 {
    let nodes: f64 = block.iter().map(|n| model.node(*n).width).sum();
    nodes + config.intra_cell_spacing * block.len().saturating_sub(1) as f64
}

/// Shifts each lane into its own cross-axis band; adjacent bands share their border.
fn place_lanes(model: &mut HierarchyModel, config: &LayoutConfig) {
    let gap = config.inter_hierarchy_spacing;
    // The trailing lane holds loose cells and only gets a band when it has any.
    let trailing = model.lanes.len();
    let count = trailing + usize::from(model.nodes.iter().any(|n| n.lane == trailing));
    let mut bands = Vec::with_capacity(count);
    let mut cursor = 0.0;

    for lane in 0..count {
        let span = model
            .nodes
            .iter()
            .filter(|n| n.lane == lane)
            .map(|n| (n.x - n.width / 2.0, n.x + n.width / 2.0))
            .reduce(|(l0, r0), (l1, r1)| (l0.min(l1), r0.max(r1)));
        let (left, right) = span.unwrap_or((cursor, cursor));
        let delta = cursor - left;
        for n in model.nodes.iter_mut().filter(|n| n.lane == lane) {
            n.x += delta;
        }
        let end = cursor + (right - left);
        bands.push((cursor - gap / 2.0, end + gap / 2.0));
        cursor = end + gap;
    }

    model.lane_bands = bands;
}

/// Moves the drawing so its minimum cross coordinate is 0 and records the extent.
fn translate_to_origin(model: &mut HierarchyModel) {
    let node_spans = model
        .nodes
        .iter()
        .map(|n| (n.x - n.width / 2.0, n.x + n.width / 2.0));
    let lane_spans = model.lane_bands.iter().copied();
    let point_spans = model
        .edges
        .iter()
        .flat_map(|e| e.points.iter().flatten())
        .map(|p| (p.x, p.x));
    let Some((min, max)) = node_spans
        .chain(lane_spans)
        .chain(point_spans)
        .reduce(|(l0, r0), (l1, r1)| (l0.min(l1), r0.max(r1)))
    else {
        model.extent = (0.0, 0.0);
        return;
    };

    for n in &mut model.nodes {
        n.x -= min;
    }
    for band in &mut model.lane_bands {
        band.0 -= min;
        band.1 -= min;
    }
    for p in model.edges.iter_mut().flat_map(|e| e.points.iter_mut().flatten()) {
        p.x -= min;
    }

    let along = model
        .bands
        .last()
        .map(|(top, thickness)| top + thickness)
        .unwrap_or_default();
    model.extent = (max - min, along);
}

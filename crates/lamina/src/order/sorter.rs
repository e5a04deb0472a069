use crate::model::{HierarchyModel, NodeId, Segment};
use std::cmp::Ordering;

/// Sort entry for one node during a sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedCell {
    pub node: NodeId,
    pub block: (usize, usize),
    /// Median neighbour position, `f64::MAX` when the node has no neighbour.
    pub weighted_value: f64,
    /// Position before this sweep.
    pub rank_index: usize,
    /// Flips the tie-break on `rank_index`. Set for every cell of a sweep alike.
    pub nudge: bool,
}

impl WeightedCell {
    /// Orders by block, then median. Ties keep the previous relative order, or flip it
    /// when `nudge` is set.
    pub fn compare(&self, other: &Self) -> Ordering {
        self.block
            .cmp(&other.block)
            .then_with(|| self.weighted_value.total_cmp(&other.weighted_value))
            .then_with(|| {
                let ord = self.rank_index.cmp(&other.rank_index);
                if self.nudge { ord.reverse() } else { ord }
            })
    }
}

/// Median of the neighbour positions; the mean of the two middle values for an even count.
pub fn median_value(neighbours: &[Segment], pos: &[usize]) -> f64 {
    if neighbours.is_empty() {
        return f64::MAX;
    }
    let mut values: Vec<f64> = neighbours.iter().map(|s| pos[s.node.0] as f64).collect();
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 1 {
        values[mid]
    } else {
        (values[mid - 1] + values[mid]) / 2.0
    }
}

/// Reorders every layer once, downward (against upper neighbours) or upward.
pub fn sweep(model: &mut HierarchyModel, downward: bool, nudge: bool) {
    let layers = model.ranks.len();
    if layers < 2 {
        return;
    }
    let order: Vec<usize> = if downward {
        (1..layers).collect()
    } else {
        (0..layers - 1).rev().collect()
    };

    let mut pos = model.positions();
    for r in order {
        let mut cells: Vec<WeightedCell> = model.ranks[r]
            .iter()
            .enumerate()
            .map(|(rank_index, &node)| {
                let neighbours = if downward {
                    model.upper_cells(node)
                } else {
                    model.lower_cells(node)
                };
                WeightedCell {
                    node,
                    block: model.node(node).block(),
                    weighted_value: median_value(neighbours, &pos),
                    rank_index,
                    nudge,
                }
            })
            .collect();
        cells.sort_by(WeightedCell::compare);

        for (i, cell) in cells.iter().enumerate() {
            pos[cell.node.0] = i;
        }
        model.ranks[r] = cells.into_iter().map(|c| c.node).collect();
    }
}

use super::priority::median_x;
use super::separation;
use crate::config::LayoutConfig;
use crate::model::{HierarchyModel, Segment};

/// Enforces the minimum separation in every layer.
///
/// A left-to-right pass pushes nodes right, a right-to-left pass pushes them left, and the
/// two placements are averaged. Both passes keep the layer order.
pub fn compact(model: &mut HierarchyModel, config: &LayoutConfig) {
    for r in 0..model.ranks.len() {
        let rank = model.ranks[r].clone();
        if rank.len() < 2 {
            continue;
        }
        let seps: Vec<f64> = rank
            .windows(2)
            .map(|w| separation(model, config, w[0], w[1]))
            .collect();
        let xs: Vec<f64> = rank.iter().map(|n| model.node(*n).x).collect();

        let mut left = xs.clone();
        for i in 1..left.len() {
            left[i] = left[i].max(left[i - 1] + seps[i - 1]);
        }
        let mut right = xs;
        for i in (0..right.len() - 1).rev() {
            right[i] = right[i].min(right[i + 1] - seps[i]);
        }

        for (i, n) in rank.iter().enumerate() {
            model.nodes[n.0].x = (left[i] + right[i]) / 2.0;
        }
    }
}

/// Moves every real node towards the median of all its neighbours, within the room its
/// layer neighbours leave.
pub fn fine_tune(model: &mut HierarchyModel, config: &LayoutConfig) {
    let mut moved: usize = 0;
    for r in 0..model.ranks.len() {
        let rank = model.ranks[r].clone();
        for (i, &n) in rank.iter().enumerate() {
            if model.node(n).is_dummy() {
                continue;
            }
            let neighbours: Vec<Segment> = model
                .upper_cells(n)
                .iter()
                .chain(model.lower_cells(n))
                .copied()
                .collect();
            let Some(target) = median_x(model, &neighbours) else {
                continue;
            };

            let mut x = target;
            if let Some(&next) = rank.get(i + 1) {
                x = x.min(model.node(next).x - separation(model, config, n, next));
            }
            if i > 0 {
                let prev = rank[i - 1];
                x = x.max(model.node(prev).x + separation(model, config, prev, n));
            }
            if x != model.node(n).x {
                model.nodes[n.0].x = x;
                moved += 1;
            }
        }
    }
    tracing::trace!(moved, "fine tuning");
}

use super::separation;
use crate::config::LayoutConfig;
use crate::model::{HierarchyModel, NodeId, Segment};

/// Dummy nodes are placed before any real node so long edges stay straight.
pub const DUMMY_PRIORITY: usize = 100_000;

/// Runs one priority placement over every layer, top-down or bottom-up.
pub fn sweep(model: &mut HierarchyModel, config: &LayoutConfig, downward: bool) {
    let layers = model.ranks.len();
    if downward {
        for r in 0..layers {
            place_rank(model, config, r);
        }
    } else {
        for r in (0..layers).rev() {
            place_rank(model, config, r);
        }
    }
}

fn place_rank(model: &mut HierarchyModel, config: &LayoutConfig, r: usize) {
    let rank = model.ranks[r].clone();
    if rank.is_empty() {
        return;
    }

    // prefix[i]: minimum distance from the first node of the rank to node i.
    let mut prefix = vec![0.0; rank.len()];
    for i in 1..rank.len() {
        prefix[i] = prefix[i - 1] + separation(model, config, rank[i - 1], rank[i]);
    }

    let priorities: Vec<usize> = rank.iter().map(|&n| priority(model, n)).collect();
    let preferred: Vec<f64> = rank.iter().map(|&n| preferred_x(model, config, n)).collect();

    let mut by_priority: Vec<usize> = (0..rank.len()).collect();
    by_priority.sort_by(|&a, &b| priorities[b].cmp(&priorities[a]).then(a.cmp(&b)));

    let mut placed = vec![false; rank.len()];
    for i in by_priority {
        let lo = (0..i)
            .rev()
            .find(|&j| placed[j])
            .map(|j| model.node(rank[j]).x + (prefix[i] - prefix[j]));
        let hi = (i + 1..rank.len())
            .find(|&j| placed[j])
            .map(|j| model.node(rank[j]).x - (prefix[j] - prefix[i]));

        let mut x = preferred[i];
        if let Some(hi) = hi {
            x = x.min(hi);
        }
        if let Some(lo) = lo {
            x = x.max(lo);
        }
        model.nodes[rank[i].0].x = x;
        placed[i] = true;
    }
}

fn priority(model: &HierarchyModel, n: NodeId) -> usize {
    if model.node(n).is_dummy() {
        DUMMY_PRIORITY
    } else {
        model.upper_cells(n).len() + model.lower_cells(n).len()
    }
}

/// Where `n` would sit if nothing else were in its layer.
pub fn preferred_x(model: &HierarchyModel, config: &LayoutConfig, n: NodeId) -> f64 {
    let upper = model.upper_cells(n);
    let lower = model.lower_cells(n);
    let upper_median = median_x(model, upper);
    if config.tighten_to_source {
        if let Some(x) = upper_median {
            return x;
        }
    }

    match (upper_median, median_x(model, lower)) {
        (Some(u), Some(l)) => {
            let wu: f64 = upper.iter().map(|s| s.weight).sum();
            let wl: f64 = lower.iter().map(|s| s.weight).sum();
            if wu + wl > 0.0 {
                (u * wu + l * wl) / (wu + wl)
            } else {
                (u + l) / 2.0
            }
        }
        (Some(u), None) => u,
        (None, Some(l)) => l,
        (None, None) => model.node(n).x,
    }
}

/// Median cross position of the segment ends, `None` without segments.
pub fn median_x(model: &HierarchyModel, segments: &[Segment]) -> Option<f64> {
    if segments.is_empty() {
        return None;
    }
    let mut xs: Vec<f64> = segments.iter().map(|s| model.node(s.node).x).collect();
    xs.sort_by(f64::total_cmp);
    let mid = xs.len() / 2;
    Some(if xs.len() % 2 == 1 {
        xs[mid]
    } else {
        (xs[mid - 1] + xs[mid]) / 2.0
    })
}

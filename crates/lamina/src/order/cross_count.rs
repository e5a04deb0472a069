use crate::model::{HierarchyModel, NodeId};

/// Weighted number of segment crossings over all pairs of adjacent layers.
pub fn cross_count(model: &HierarchyModel) -> f64 {
    let pos = model.positions();
    let mut cc: f64 = 0.0;
    for i in 1..model.ranks.len() {
        cc += two_layer_cross_count(model, &pos, &model.ranks[i - 1], &model.ranks[i]);
    }
    cc
}

/// Accumulator-tree count of crossings between the segments joining `north` to `south`.
fn two_layer_cross_count(
    model: &HierarchyModel,
    pos: &[usize],
    north: &[NodeId],
    south: &[NodeId],
) -> f64 {
    if south.is_empty() {
        return 0.0;
    }

    #[derive(Debug, Clone, Copy)]
    struct SouthEntry {
        pos: usize,
        weight: f64,
    }

    let mut south_entries: Vec<SouthEntry> = Vec::new();
    for v in north {
        let mut entries: Vec<SouthEntry> = model
            .lower_cells(*v)
            .iter()
            .map(|s| SouthEntry {
                pos: pos[s.node.0],
                weight: s.weight,
            })
            .collect();
        entries.sort_by_key(|e| e.pos);
        south_entries.extend(entries);
    }

    let mut first_index: usize = 1;
    while first_index < south.len() {
        first_index <<= 1;
    }
    let tree_size = 2 * first_index - 1;
    first_index -= 1;
    let mut tree: Vec<f64> = vec![0.0; tree_size];

    let mut cc: f64 = 0.0;
    for entry in south_entries {
        let mut index = entry.pos + first_index;
        tree[index] += entry.weight;
        let mut weight_sum: f64 = 0.0;
        while index > 0 {
            if index % 2 == 1 {
                weight_sum += tree[index + 1];
            }
            index = (index - 1) >> 1;
            tree[index] += entry.weight;
        }
        cc += entry.weight * weight_sum;
    }

    cc
}

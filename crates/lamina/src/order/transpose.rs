use crate::model::{HierarchyModel, NodeId, Segment};

/// Swaps adjacent same-block nodes while a swap strictly reduces their crossings.
///
/// Returns the number of swaps performed.
pub fn transpose(model: &mut HierarchyModel) -> usize {
    let mut pos = model.positions();
    let mut swaps: usize = 0;

    for r in 0..model.ranks.len() {
        let len = model.ranks[r].len();
        // Each swap lowers the weighted crossing count; the pass bound caps the work.
        for _ in 0..len {
            let mut improved = false;
            for i in 1..len {
                let (left, right) = (model.ranks[r][i - 1], model.ranks[r][i]);
                if model.node(left).block() != model.node(right).block() {
                    continue;
                }
                let kept = pair_crossings(model, &pos, left, right);
                let swapped = pair_crossings(model, &pos, right, left);
                if swapped < kept {
                    model.ranks[r].swap(i - 1, i);
                    pos[left.0] = i;
                    pos[right.0] = i - 1;
                    swaps += 1;
                    improved = true;
                }
            }
            if !improved {
                break;
            }
        }
    }

    swaps
}

/// Weighted crossings between the segments of `left` and `right` when `left` sits first.
fn pair_crossings(model: &HierarchyModel, pos: &[usize], left: NodeId, right: NodeId) -> f64 {
    side_crossings(model.upper_cells(left), model.upper_cells(right), pos)
        + side_crossings(model.lower_cells(left), model.lower_cells(right), pos)
}

fn side_crossings(left: &[Segment], right: &[Segment], pos: &[usize]) -> f64 {
    let mut cc = 0.0;
    for a in left {
        for b in right {
            if pos[a.node.0] > pos[b.node.0] {
                cc += a.weight * b.weight;
            }
        }
    }
    cc
}

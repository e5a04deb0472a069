//! Crossing Reducer: weighted-median sweeps over the layer ordering.
//!
//! Each iteration sorts every layer by the median position of its neighbours in the layer
//! that was just fixed, then runs a transpose pass. The best ordering seen so far is kept
//! and restored whenever an iteration does not improve on it, so the result never has more
//! crossings than the ordering the model started with.

mod cross_count;
mod sorter;
mod transpose;

pub use cross_count::cross_count;
pub use sorter::{WeightedCell, median_value, sweep};
pub use transpose::transpose;

use crate::config::LayoutConfig;
use crate::model::HierarchyModel;

/// Number of consecutive non-improving iterations after which the loop stops, whatever
/// budget `LayoutConfig::max_iterations` leaves.
const MAX_STALE_ITERATIONS: usize = 2;

pub fn run(model: &mut HierarchyModel, config: &LayoutConfig) {
    let initial = cross_count(model);
    let mut best_cc = initial;
    let mut best = model.ranks.clone();
    let mut stale: usize = 0;
    let mut iterations: usize = 0;

    for i in 0..config.max_iterations {
        if best_cc == 0.0 || stale >= MAX_STALE_ITERATIONS || model.ranks.len() < 2 {
            break;
        }
        iterations += 1;

        let downward = i % 2 == 0;
        let nudge = i % 4 >= 2;
        sweep(model, downward, nudge);
        transpose(model);

        let cc = cross_count(model);
        tracing::trace!(iteration = i, downward, crossings = cc, "ordering sweep");
        if cc < best_cc {
            best_cc = cc;
            best = model.ranks.clone();
            stale = 0;
        } else {
            model.ranks.clone_from(&best);
            stale += 1;
        }
    }

    model.ranks = best;
    tracing::debug!(
        iterations,
        initial_crossings = initial,
        crossings = best_cc,
        "crossing reduction finished"
    );
}

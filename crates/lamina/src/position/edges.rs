use crate::config::LayoutConfig;
use crate::model::{HierarchyEdge, HierarchyModel};
use lamina_graph::Point;

/// Fills the waypoints of every merged host edge, in layout direction.
///
/// Member `k` of `n` is shifted by `(k - (n - 1) / 2) * parallelEdgeSpacing` across the
/// layer axis. Fanned members also get a jetty point below the source band and one above
/// the target band, so their first and last segments do not overlap either.
pub fn route(model: &mut HierarchyModel, config: &LayoutConfig) {
    for idx in 0..model.edges.len() {
        let points = if config.disable_edge_style {
            vec![Vec::new(); model.edges[idx].weight()]
        } else {
            member_points(model, &model.edges[idx], config)
        };
        model.edges[idx].points = points;
    }
}

fn member_points(
    model: &HierarchyModel,
    edge: &HierarchyEdge,
    config: &LayoutConfig,
) -> Vec<Vec<Point>> {
    let n = edge.weight();
    let source = model.node(edge.source);
    let target = model.node(edge.target);
    let source_bottom = source
        .layer
        .and_then(|l| model.bands.get(l))
        .map(|(top, thickness)| top + thickness);
    let target_top = target
        .layer
        .and_then(|l| model.bands.get(l))
        .map(|(top, _)| *top);

    let mut out = Vec::with_capacity(n);
    for k in 0..n {
        let offset = (k as f64 - (n as f64 - 1.0) / 2.0) * config.parallel_edge_spacing;
        let mut points = Vec::with_capacity(edge.chain.len() + 2);
        if n > 1 {
            if let Some(y) = source_bottom {
                points.push(Point::new(source.x + offset, y));
            }
        }
        points.extend(edge.chain.iter().map(|d| {
            let dummy = model.node(*d);
            Point::new(dummy.x + offset, dummy.y)
        }));
        if n > 1 {
            if let Some(y) = target_top {
                points.push(Point::new(target.x + offset, y));
            }
        }
        out.push(points);
    }
    out
}

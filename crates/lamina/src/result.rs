use crate::config::LayoutConfig;
use crate::coordinate_system::Frame;
use crate::model::HierarchyModel;
use indexmap::IndexMap;
use lamina_graph::{Point, Rect};
use serde::Serialize;

/// Laid-out geometry in the layout parent's coordinate frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LayoutResult {
    pub vertices: IndexMap<String, Rect>,
    /// Waypoints per host edge, in host edge direction. Empty when edge styling is off.
    pub edges: IndexMap<String, Vec<Point>>,
    /// Swimlane rectangles, when lanes are enabled.
    pub lanes: IndexMap<String, Rect>,
    /// Size of the laid-out content, borders included.
    pub width: f64,
    pub height: f64,
}

impl LayoutResult {
    pub fn from_model(model: &HierarchyModel, config: &LayoutConfig) -> Self {
        let (cross, along) = model.extent();
        let border = config.parent_border;
        let frame = Frame::new(config.orientation, along, border);

        let mut vertices = IndexMap::new();
        for node in model.nodes() {
            if let Some(cell) = node.cell() {
                let rect = frame.rect(Point::new(node.x, node.y), node.width, node.height);
                vertices.insert(cell.to_string(), rect);
            }
        }

        let mut edges = IndexMap::new();
        for edge in model.edges() {
            for (member, points) in edge.edges.iter().zip(&edge.points) {
                let mut points: Vec<Point> = points.iter().map(|p| frame.point(*p)).collect();
                if edge.runs_against_layout(member) {
                    points.reverse();
                }
                edges.insert(member.cell.clone(), points);
            }
        }

        let mut lanes = IndexMap::new();
        for (cell, (start, end)) in model.lanes().iter().zip(model.lane_bands()) {
            let center = Point::new((start + end) / 2.0, along / 2.0);
            lanes.insert(cell.clone(), frame.rect(center, end - start, along));
        }

        let (width, height) = if config.orientation.is_horizontal() {
            (along, cross)
        } else {
            (cross, along)
        };
        Self {
            vertices,
            edges,
            lanes,
            width: width + 2.0 * border,
            height: height + 2.0 * border,
        }
    }
}

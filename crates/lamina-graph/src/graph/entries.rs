//! Vertex and edge records stored by [`Graph`](super::Graph).

use super::{Point, Rect};

#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    pub(in crate::graph) id: String,
    pub(in crate::graph) geometry: Rect,
    pub(in crate::graph) parent: Option<String>,
}

impl Vertex {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn geometry(&self) -> Rect {
        self.geometry
    }

    /// The group this vertex is nested in, if any.
    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub(in crate::graph) id: String,
    pub(in crate::graph) source: String,
    pub(in crate::graph) target: String,
    pub(in crate::graph) points: Vec<Point>,
}

impl Edge {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Waypoints between the two terminals. Empty means a straight line.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn is_loop(&self) -> bool {
        self.source == self.target
    }
}

//! Change records and the scoped update guard.

use super::{Graph, Point, Rect};
use std::ops::{Deref, DerefMut};

/// One observable mutation, reported to listeners when the outermost update closes.
#[derive(Debug, Clone, PartialEq)]
pub enum Change {
    Geometry {
        id: String,
        previous: Rect,
        current: Rect,
    },
    Points {
        id: String,
        previous: Vec<Point>,
        current: Vec<Point>,
    },
}

impl Change {
    pub fn id(&self) -> &str {
        match self {
            Change::Geometry { id, .. } | Change::Points { id, .. } => id,
        }
    }
}

pub(in crate::graph) type Listener = Box<dyn FnMut(&[Change])>;

/// Keeps an update scope open for as long as it lives.
///
/// Dropping the guard calls [`Graph::end_update`], including during unwinding and on early
/// `?` returns.
pub struct UpdateGuard<'a> {
    pub(in crate::graph) graph: &'a mut Graph,
}

impl Deref for UpdateGuard<'_> {
    type Target = Graph;

    fn deref(&self) -> &Graph {
        self.graph
    }
}

impl DerefMut for UpdateGuard<'_> {
    fn deref_mut(&mut self) -> &mut Graph {
        self.graph
    }
}

impl Drop for UpdateGuard<'_> {
    fn drop(&mut self) {
        self.graph.end_update();
    }
}

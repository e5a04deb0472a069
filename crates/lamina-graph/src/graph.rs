//! The host graph container.
//!
//! Vertices and edges are kept in insertion order. Everything downstream that needs a
//! deterministic tie-break (root discovery, the unseen-node pass of cycle removal, initial
//! layer order) relies on that order, so it is never reshuffled.

mod change;
mod entries;
mod geometry;

pub mod alg;

pub use change::{Change, UpdateGuard};
pub use entries::{Edge, Vertex};
pub use geometry::{Point, Rect};

use crate::error::{GraphError, Result};
use change::Listener;
use indexmap::IndexMap;
use rustc_hash::{FxBuildHasher, FxHashMap};
use std::fmt;

type OrderedMap<K, V> = IndexMap<K, V, FxBuildHasher>;

#[derive(Default)]
pub struct Graph {
    vertices: OrderedMap<String, Vertex>,
    edges: OrderedMap<String, Edge>,

    // Containment and incidence indexes; both keep insertion order per key.
    children: FxHashMap<String, Vec<String>>,
    incident: FxHashMap<String, Vec<String>>,

    update_level: usize,
    pending: Vec<Change>,
    listeners: Vec<Listener>,
}

impl fmt::Debug for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Graph")
            .field("vertices", &self.vertices.len())
            .field("edges", &self.edges.len())
            .field("update_level", &self.update_level)
            .field("pending", &self.pending.len())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_vertex(&mut self, id: impl Into<String>, geometry: Rect) -> Result<&mut Self> {
        let id = id.into();
        if self.vertices.contains_key(&id) {
            return Err(GraphError::DuplicateVertex { id });
        }
        self.vertices.insert(
            id.clone(),
            Vertex {
                id,
                geometry,
                parent: None,
            },
        );
        Ok(self)
    }

    pub fn add_edge(
        &mut self,
        id: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
    ) -> Result<&mut Self> {
        let id = id.into();
        let source = source.into();
        let target = target.into();
        if self.edges.contains_key(&id) {
            return Err(GraphError::DuplicateEdge { id });
        }
        for endpoint in [&source, &target] {
            if !self.vertices.contains_key(endpoint) {
                return Err(GraphError::MissingEndpoint {
                    edge_id: id,
                    vertex_id: endpoint.clone(),
                });
            }
        }

        self.incident
            .entry(source.clone())
            .or_default()
            .push(id.clone());
        if target != source {
            self.incident
                .entry(target.clone())
                .or_default()
                .push(id.clone());
        }
        self.edges.insert(
            id.clone(),
            Edge {
                id,
                source,
                target,
                points: Vec::new(),
            },
        );
        Ok(self)
    }

    /// Nests `child` inside `parent`, detaching it from its previous group.
    pub fn set_parent(&mut self, child: &str, parent: &str) -> Result<&mut Self> {
        if !self.vertices.contains_key(parent) {
            return Err(GraphError::UnknownVertex {
                id: parent.to_string(),
            });
        }
        if !self.vertices.contains_key(child) {
            return Err(GraphError::UnknownVertex {
                id: child.to_string(),
            });
        }
        if child == parent || self.is_ancestor(child, parent) {
            return Err(GraphError::ContainmentCycle {
                child: child.to_string(),
                parent: parent.to_string(),
            });
        }

        let previous = self
            .vertices
            .get_mut(child)
            .and_then(|v| v.parent.replace(parent.to_string()));
        if let Some(previous) = previous {
            if let Some(siblings) = self.children.get_mut(&previous) {
                siblings.retain(|c| c != child);
            }
        }
        self.children
            .entry(parent.to_string())
            .or_default()
            .push(child.to_string());
        Ok(self)
    }

    /// Whether `ancestor` contains `id`, directly or transitively.
    pub fn is_ancestor(&self, ancestor: &str, id: &str) -> bool {
        let mut cur = self.vertex(id).and_then(|v| v.parent());
        while let Some(p) = cur {
            if p == ancestor {
                return true;
            }
            cur = self.vertex(p).and_then(|v| v.parent());
        }
        false
    }

    pub fn has_vertex(&self, id: &str) -> bool {
        self.vertices.contains_key(id)
    }

    pub fn vertex(&self, id: &str) -> Option<&Vertex> {
        self.vertices.get(id)
    }

    pub fn edge(&self, id: &str) -> Option<&Edge> {
        self.edges.get(id)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.vertices.values()
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    /// Direct children of `parent`, or the top-level vertices when `parent` is `None`.
    pub fn children(&self, parent: Option<&str>) -> Vec<&str> {
        match parent {
            Some(p) => self
                .children
                .get(p)
                .map(|c| c.iter().map(String::as_str).collect())
                .unwrap_or_default(),
            None => self
                .vertices
                .values()
                .filter(|v| v.parent.is_none())
                .map(|v| v.id.as_str())
                .collect(),
        }
    }

    pub fn is_group(&self, id: &str) -> bool {
        self.children.get(id).is_some_and(|c| !c.is_empty())
    }

    /// Edges touching `v`, in insertion order. A self-loop is listed once.
    pub fn incident_edges(&self, v: &str) -> Vec<&Edge> {
        self.incident
            .get(v)
            .map(|ids| ids.iter().filter_map(|id| self.edges.get(id)).collect())
            .unwrap_or_default()
    }

    pub fn set_geometry(&mut self, id: &str, geometry: Rect) -> Result<()> {
        let Some(vertex) = self.vertices.get_mut(id) else {
            return Err(GraphError::UnknownVertex { id: id.to_string() });
        };
        let previous = std::mem::replace(&mut vertex.geometry, geometry);
        if previous == geometry {
            return Ok(());
        }
        self.record(Change::Geometry {
            id: id.to_string(),
            previous,
            current: geometry,
        });
        Ok(())
    }

    pub fn set_points(&mut self, id: &str, points: Vec<Point>) -> Result<()> {
        let Some(edge) = self.edges.get_mut(id) else {
            return Err(GraphError::UnknownEdge { id: id.to_string() });
        };
        if edge.points == points {
            return Ok(());
        }
        let previous = std::mem::replace(&mut edge.points, points.clone());
        self.record(Change::Points {
            id: id.to_string(),
            previous,
            current: points,
        });
        Ok(())
    }

    /// Registers a listener that receives every batch of changes.
    pub fn on_change<F>(&mut self, listener: F) -> &mut Self
    where
        F: FnMut(&[Change]) + 'static,
    {
        self.listeners.push(Box::new(listener));
        self
    }

    pub fn update_level(&self) -> usize {
        self.update_level
    }

    pub fn begin_update(&mut self) {
        self.update_level += 1;
    }

    /// Closes one update level. Listeners fire when the outermost level closes and at least
    /// one change was recorded.
    pub fn end_update(&mut self) {
        if self.update_level == 0 {
            tracing::warn!("end_update called without a matching begin_update");
            return;
        }
        self.update_level -= 1;
        if self.update_level > 0 || self.pending.is_empty() {
            return;
        }
        let changes = std::mem::take(&mut self.pending);
        tracing::trace!(changes = changes.len(), "notifying change listeners");
        for listener in &mut self.listeners {
            listener(&changes);
        }
    }

    /// Opens an update scope that closes when the returned guard is dropped.
    pub fn batch(&mut self) -> UpdateGuard<'_> {
        self.begin_update();
        UpdateGuard { graph: self }
    }

    fn record(&mut self, change: Change) {
        // A mutation outside any scope is its own single-change batch.
        self.begin_update();
        self.pending.push(change);
        self.end_update();
    }
}

//! The per-run hierarchy model shared by every pipeline stage.
//!
//! Nodes and edges live in arenas addressed by [`NodeId`] / [`EdgeId`]. Adjacency is kept as
//! id lists on each node, so nothing in the model forms a reference cycle. The model is built
//! fresh by [`crate::build`] for every layout run and dropped when the run ends.

use lamina_graph::Point;
use rustc_hash::FxHashMap;
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(pub usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Wraps one host vertex.
    Vertex { cell: String },
    /// One intermediate layer of a long edge.
    Dummy { edge: EdgeId },
}

#[derive(Debug, Clone, PartialEq)]
pub struct HierarchyNode {
    pub id: NodeId,
    pub kind: NodeKind,
    pub layer: Option<usize>,
    pub connects_as_target: Vec<EdgeId>,
    pub connects_as_source: Vec<EdgeId>,
    /// Set while the node is on the cycle remover's DFS stack.
    pub(crate) on_stack: bool,
    /// Cross-axis centre, in the canonical (top-down) frame.
    pub x: f64,
    /// Layer-axis centre, in the canonical frame.
    pub y: f64,
    /// Size along the cross axis.
    pub width: f64,
    /// Size along the layer axis.
    pub height: f64,
    pub lane: usize,
    pub component: usize,
}

impl HierarchyNode {
    pub fn is_dummy(&self) -> bool {
        matches!(self.kind, NodeKind::Dummy { .. })
    }

    /// Whether the node is still marked as a DFS ancestor. False outside cycle removal.
    pub fn on_stack(&self) -> bool {
        self.on_stack
    }

    pub fn cell(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Vertex { cell } => Some(cell),
            NodeKind::Dummy { .. } => None,
        }
    }

    /// Nodes sharing a block key stay contiguous within every layer.
    pub fn block(&self) -> (usize, usize) {
        (self.lane, self.component)
    }
}

/// One host edge folded into a [`HierarchyEdge`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedEdge {
    pub cell: String,
    /// The host edge runs against the direction the hierarchy edge was created with.
    pub reversed: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HierarchyEdge {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
    pub inverted: bool,
    pub edges: Vec<MergedEdge>,
    /// Dummy nodes from source towards target, one per intermediate layer.
    pub chain: Vec<NodeId>,
    /// Waypoints per merged host edge, in layout direction and canonical frame.
    pub points: Vec<Vec<Point>>,
}

impl HierarchyEdge {
    pub fn weight(&self) -> usize {
        self.edges.len()
    }

    /// Whether `member` must have its waypoints reversed to match its host direction.
    pub fn runs_against_layout(&self, member: &MergedEdge) -> bool {
        member.reversed != self.inverted
    }

    /// Source, dummies and target, in layout direction.
    pub fn path(&self) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.chain.len() + 2);
        out.push(self.source);
        out.extend(self.chain.iter().copied());
        out.push(self.target);
        out
    }
}

/// A unit-length link between two nodes of adjacent layers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub node: NodeId,
    pub weight: f64,
}

#[derive(Debug, Clone, Default)]
pub struct HierarchyModel {
    pub(crate) nodes: Vec<HierarchyNode>,
    pub(crate) edges: Vec<HierarchyEdge>,
    pub(crate) vertex_mapper: FxHashMap<String, NodeId>,
    pub(crate) edge_mapper: FxHashMap<String, EdgeId>,
    pub(crate) roots: Vec<NodeId>,
    pub(crate) ranks: Vec<Vec<NodeId>>,
    /// Lane group ids, indexed by `HierarchyNode::lane`. Empty without swimlanes.
    pub(crate) lanes: Vec<String>,
    pub(crate) upper: Vec<Vec<Segment>>,
    pub(crate) lower: Vec<Vec<Segment>>,
    /// Top and thickness of each layer band along the layer axis.
    pub(crate) bands: Vec<(f64, f64)>,
    /// Cross-axis `(start, end)` of each lane, the trailing lane of loose cells included.
    pub(crate) lane_bands: Vec<(f64, f64)>,
    /// Canonical `(cross, along)` size of the drawing.
    pub(crate) extent: (f64, f64),
}

impl HierarchyModel {
    pub fn nodes(&self) -> &[HierarchyNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[HierarchyEdge] {
        &self.edges
    }

    pub fn node(&self, id: NodeId) -> &HierarchyNode {
        &self.nodes[id.0]
    }

    pub fn edge(&self, id: EdgeId) -> &HierarchyEdge {
        &self.edges[id.0]
    }

    pub fn node_of(&self, cell: &str) -> Option<NodeId> {
        self.vertex_mapper.get(cell).copied()
    }

    pub fn edge_of(&self, cell: &str) -> Option<EdgeId> {
        self.edge_mapper.get(cell).copied()
    }

    pub fn layer_of(&self, cell: &str) -> Option<usize> {
        self.node_of(cell).and_then(|n| self.node(n).layer)
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn ranks(&self) -> &[Vec<NodeId>] {
        &self.ranks
    }

    pub fn lanes(&self) -> &[String] {
        &self.lanes
    }

    pub fn bands(&self) -> &[(f64, f64)] {
        &self.bands
    }

    pub fn lane_bands(&self) -> &[(f64, f64)] {
        &self.lane_bands
    }

    pub fn extent(&self) -> (f64, f64) {
        self.extent
    }

    /// Neighbours in the layer above, one entry per segment.
    pub fn upper_cells(&self, id: NodeId) -> &[Segment] {
        self.upper.get(id.0).map(Vec::as_slice).unwrap_or_default()
    }

    /// Neighbours in the layer below, one entry per segment.
    pub fn lower_cells(&self, id: NodeId) -> &[Segment] {
        self.lower.get(id.0).map(Vec::as_slice).unwrap_or_default()
    }

    pub(crate) fn add_node(&mut self, kind: NodeKind, width: f64, height: f64) -> NodeId {
        let id = NodeId(self.nodes.len());
        if let NodeKind::Vertex { cell } = &kind {
            self.vertex_mapper.insert(cell.clone(), id);
        }
        self.nodes.push(HierarchyNode {
            id,
            kind,
            layer: None,
            connects_as_target: Vec::new(),
            connects_as_source: Vec::new(),
            on_stack: false,
            x: 0.0,
            y: 0.0,
            width,
            height,
            lane: 0,
            component: 0,
        });
        id
    }

    pub(crate) fn add_edge(&mut self, source: NodeId, target: NodeId, first: MergedEdge) -> EdgeId {
        let id = EdgeId(self.edges.len());
        self.edge_mapper.insert(first.cell.clone(), id);
        self.edges.push(HierarchyEdge {
            id,
            source,
            target,
            inverted: false,
            edges: vec![first],
            chain: Vec::new(),
            points: Vec::new(),
        });
        self.nodes[source.0].connects_as_source.push(id);
        self.nodes[target.0].connects_as_target.push(id);
        id
    }

    pub(crate) fn merge_into(&mut self, edge: EdgeId, member: MergedEdge) {
        self.edge_mapper.insert(member.cell.clone(), edge);
        self.edges[edge.0].edges.push(member);
    }

    /// Reverses the layout direction of `edge` and moves it between the endpoint lists.
    ///
    /// Host edge endpoints are untouched; only the `inverted` flag records the swap.
    pub fn invert_edge(&mut self, edge: EdgeId) {
        let (old_source, old_target) = {
            let e = &mut self.edges[edge.0];
            std::mem::swap(&mut e.source, &mut e.target);
            e.inverted = !e.inverted;
            e.chain.reverse();
            (e.target, e.source)
        };

        let src = &mut self.nodes[old_source.0];
        src.connects_as_source.retain(|e| *e != edge);
        src.connects_as_target.push(edge);

        let tgt = &mut self.nodes[old_target.0];
        tgt.connects_as_target.retain(|e| *e != edge);
        tgt.connects_as_source.push(edge);
    }

    /// Kahn order over the model edges, seeded and expanded in arena order.
    ///
    /// Returns `None` when the edges still contain a cycle.
    pub fn topological_order(&self) -> Option<Vec<NodeId>> {
        let mut indegree: Vec<usize> = self
            .nodes
            .iter()
            .map(|n| n.connects_as_target.len())
            .collect();
        let mut queue: VecDeque<NodeId> = self
            .nodes
            .iter()
            .filter(|n| indegree[n.id.0] == 0)
            .map(|n| n.id)
            .collect();

        let mut order: Vec<NodeId> = Vec::with_capacity(self.nodes.len());
        while let Some(n) = queue.pop_front() {
            order.push(n);
            for e in &self.nodes[n.0].connects_as_source {
                let w = self.edges[e.0].target;
                indegree[w.0] = indegree[w.0].saturating_sub(1);
                if indegree[w.0] == 0 {
                    queue.push_back(w);
                }
            }
        }

        (order.len() == self.nodes.len()).then_some(order)
    }

    /// Current index of every node within its rank, indexed by node id.
    pub fn positions(&self) -> Vec<usize> {
        let mut pos = vec![0usize; self.nodes.len()];
        for rank in &self.ranks {
            for (i, n) in rank.iter().enumerate() {
                pos[n.0] = i;
            }
        }
        pos
    }
}

#![forbid(unsafe_code)]

//! Layered (Sugiyama-style) hierarchical graph layout.
//!
//! A layout run builds a [`HierarchyModel`] from the host graph, breaks cycles, assigns
//! layers, reduces crossings and assigns coordinates, then writes vertex geometry and edge
//! waypoints back inside one host update scope. See [`HierarchicalLayout`] and
//! [`CompositeLayout`].

pub use lamina_graph as graph;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod acyclic;
pub mod build;
pub mod config;
pub mod coordinate_system;
pub mod error;
pub mod layout;
pub mod model;
pub mod normalize;
pub mod order;
pub mod pipeline;
pub mod position;
pub mod rank;
pub mod result;

pub use build::build;
pub use config::{LayoutConfig, Orientation};
pub use error::{Error, Result};
pub use layout::{CompositeLayout, GraphLayout, HierarchicalLayout};
pub use model::{
    EdgeId, HierarchyEdge, HierarchyModel, HierarchyNode, MergedEdge, NodeId, NodeKind, Segment,
};
pub use pipeline::{Pipeline, Stage};
pub use result::LayoutResult;

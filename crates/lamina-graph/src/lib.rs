#![forbid(unsafe_code)]

//! Host graph model consumed by `lamina`.
//!
//! The graph owns vertices (optionally nested into groups), edges with waypoints, and a
//! nestable update scope. Mutations recorded while a scope is open are delivered to change
//! listeners once, when the outermost scope closes.

pub mod error;
pub mod graph;

pub use error::{GraphError, Result};
pub use graph::{Change, Edge, Graph, Point, Rect, UpdateGuard, Vertex, alg};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("duplicate vertex id: {id}")]
    DuplicateVertex { id: String },

    #[error("duplicate edge id: {id}")]
    DuplicateEdge { id: String },

    #[error("unknown vertex: {id}")]
    UnknownVertex { id: String },

    #[error("unknown edge: {id}")]
    UnknownEdge { id: String },

    #[error("edge {edge_id} references a missing endpoint: {vertex_id}")]
    MissingEndpoint { edge_id: String, vertex_id: String },

    #[error("setting {parent} as the parent of {child} would create a containment cycle")]
    ContainmentCycle { child: String, parent: String },
}

pub type Result<T> = std::result::Result<T, GraphError>;

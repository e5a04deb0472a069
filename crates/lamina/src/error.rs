#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Graph(#[from] lamina_graph::GraphError),

    #[error("unknown vertex: {id}")]
    UnknownVertex { id: String },

    #[error("unknown layout parent: {id}")]
    UnknownParent { id: String },

    #[error("invalid layout configuration: {message}")]
    InvalidConfig { message: String },

    #[error("hierarchy model is inconsistent: {message}")]
    CorruptModel { message: String },

    #[error("composite layout has no layouts to run")]
    EmptyComposite,

    #[error("master layout index {index} is out of range for {len} layouts")]
    InvalidMaster { index: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, Error>;

use ontodir_directory::RestrictionError;
use ontodir_tree::TransformError;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("failed to fetch {resource}")]
    Fetch {
        resource: String,
        #[source]
        source: anyhow::Error,
    },
    #[error("unknown {kind} `{name}`")]
    UnknownIdentifier { kind: &'static str, name: String },
    #[error("invalid server root `{root}`: {reason}")]
    InvalidServerRoot { root: String, reason: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
    #[error(transparent)]
    Transform(#[from] TransformError),
    #[error(transparent)]
    Restriction(#[from] RestrictionError),
}

use thiserror::Error;

/// Unified error type for gitmoji-release operations
#[derive(Error, Debug)]
pub enum GitmojiError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Reference not found: {0}")]
    RefNotFound(String),

    #[error("'{tail}' is not an ancestor of '{head}'")]
    NotAncestor { tail: String, head: String },

    #[error("No gitmoji found in message: {0}")]
    NoMarkerFound(String),

    #[error("Message does not start with a gitmoji: {0}")]
    MarkerNotAtStart(String),

    #[error("Unsupported bump value: {0} (expected patch, minor or major)")]
    InvalidBump(String),

    #[error("Unsupported version floor scope: {0} (expected global or reachable)")]
    InvalidScope(String),

    #[error("Cannot apply a {bump} bump to {version}: component would overflow")]
    VersionOverflow { version: String, bump: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Tag error: {0}")]
    Tag(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Convenience type alias for Results in gitmoji-release
pub type Result<T> = std::result::Result<T, GitmojiError>;

impl GitmojiError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        GitmojiError::Config(msg.into())
    }

    /// Create a tag error with context
    pub fn tag(msg: impl Into<String>) -> Self {
        GitmojiError::Tag(msg.into())
    }

    /// Create a not-found error naming the unresolved value
    pub fn ref_not_found(name: impl Into<String>) -> Self {
        GitmojiError::RefNotFound(name.into())
    }
}

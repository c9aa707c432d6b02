//! Document store error types.

/// Errors surfaced by a [`DocumentStore`](super::DocumentStore).
#[derive(Debug, Clone, PartialEq)]
pub enum StoreError {
    /// Server unreachable or connection dropped
    Connection(String),
    /// Authentication failed or the caller lacks privileges
    Unauthorized(String),
    /// A principal with this name already exists on the database
    DuplicatePrincipal { name: String, database: String },
    /// Document payload rejected by the store or the encoder
    InvalidDocument(String),
    /// Any other failed server command
    Command { code: Option<i32>, message: String },
}

impl StoreError {
    /// Failure of the connection/authorization class (fatal on first contact).
    pub fn is_connection_error(&self) -> bool {
        matches!(self, StoreError::Connection(_) | StoreError::Unauthorized(_))
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Connection(e) => write!(f, "Connection error: {}", e),
            StoreError::Unauthorized(e) => write!(f, "Not authorized: {}", e),
            StoreError::DuplicatePrincipal { name, database } => {
                write!(f, "User '{}' already exists on database '{}'", name, database)
            }
            StoreError::InvalidDocument(e) => write!(f, "Invalid document: {}", e),
            StoreError::Command {
                code: Some(code),
                message,
            } => write!(f, "Command failed ({}): {}", code, message),
            StoreError::Command {
                code: None,
                message,
            } => write!(f, "Command failed: {}", message),
        }
    }
}

impl std::error::Error for StoreError {}

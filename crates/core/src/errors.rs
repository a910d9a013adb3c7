use thiserror::Error;

// Create a type alias for Result using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the application core.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("Artifact operation failed: {0}")]
    Artifact(#[from] ArtifactError),
}

/// Database failures, stringly typed so the core stays free of any
/// particular database backend. The storage crate converts its own error
/// types into these at the boundary.
#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    #[error("Failed to create database pool: {0}")]
    PoolCreationFailed(String),

    #[error("Database query failed: {0}")]
    QueryFailed(String),

    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error("Internal database error: {0}")]
    Internal(String),
}

/// Summary artifact failures.
#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error("No summary artifact has been generated yet")]
    NotFound,

    #[error("Failed to render summary image: {0}")]
    RenderFailed(String),

    #[error("Failed to write summary artifact: {0}")]
    WriteFailed(String),
}

// Add From implementation for std::io::Error
impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Artifact(ArtifactError::WriteFailed(err.to_string()))
    }
}

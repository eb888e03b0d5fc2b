use sea_orm::DbErr;
use thiserror::Error;

/// Everything a layout, catalog or template operation can fail with.
///
/// Hard errors always abort the whole operation; nothing is partially applied.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("layout rejected: {}", .0.join("; "))]
    ValidationFailed(Vec<String>),

    /// A seat that would be dropped still has an active reservation
    #[error("seat {0} has an active reservation")]
    SeatInUse(String),

    #[error("seating type capacity must be at least 1")]
    InvalidCapacity,

    #[error("seating type is referenced by placed seats")]
    InUse,

    /// The kind of record that was not found, e.g. `"event"`
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("invalid template document: {0}")]
    InvalidDocument(String),

    #[error(transparent)]
    Database(#[from] DbErr),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} environment variable must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Error)]
pub enum ConnectError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Database(#[from] DbErr),
}

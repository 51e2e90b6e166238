use thiserror::Error;

/// Top-level error type for the periclip kernel.
#[derive(Debug, Error)]
pub enum PericlipError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Operation(#[from] OperationError),
}

/// Errors raised while constructing or validating geometry.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("period range [{start}, {end}) is malformed")]
    InvalidPeriodRange { start: f64, end: f64 },

    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("contour is not closed: simplex {index} ends away from the next start")]
    NotChained { index: usize },

    #[error("contour has no simplexes")]
    Empty,
}

/// Errors related to kernel operations.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Convenience type alias for results using [`PericlipError`].
pub type Result<T> = std::result::Result<T, PericlipError>;

//! Error types for contract checks at construction and configuration time.

/// Rejection reasons for a vertex list that cannot form a polygon.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum GeometryError {
    #[error("polygon needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),
    #[error("flat coordinate list has odd length {0}")]
    OddCoordinateCount(usize),
    #[error("polygon vertex {index} is not finite")]
    NonFiniteVertex { index: usize },
    #[error("polygon has zero or non-finite signed area ({0})")]
    Degenerate(f64),
}

/// Rejection reasons for a body.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum BodyError {
    #[error("body mass must be positive, got {0}")]
    NonPositiveMass(f64),
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// Rejection reasons for a settings bundle.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("settings JSON is malformed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("setting `{name}` is out of range: {value}")]
    OutOfRange { name: &'static str, value: f64 },
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MaskError {
    #[error("Failed to load image: {0}")]
    ImageLoad(#[from] image::ImageError),

    #[error("Mask must have at least one row and one column (got {rows}x{cols})")]
    EmptyMask { rows: usize, cols: usize },

    #[error("Mask is not rectangular: row {row} has {found} cells, expected {expected}")]
    NonRectangular {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Mask of {rows}x{cols} cells exceeds the supported lattice size")]
    MaskTooLarge { rows: usize, cols: usize },

    #[error("Cell ({row}, {col}) is outside the {rows}x{cols} mask")]
    CellOutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("Failed to parse mask: {0}")]
    MaskParse(String),

    /// A defect in the tracing algorithm, never a data problem.
    #[error("Internal invariant violated: {0}")]
    InvariantViolation(String),

    #[error("Geometric computation error: {0}")]
    GeometricComputation(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),
}

pub type Result<T> = std::result::Result<T, MaskError>;

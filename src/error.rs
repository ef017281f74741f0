use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Expected {expected} landmarks, got {actual}")]
    LandmarkCount { expected: usize, actual: usize },

    #[error("Landmark {index} has a non-finite coordinate")]
    NonFinitePoint { index: usize },

    #[error("Degenerate midline: forehead top and chin bottom coincide")]
    DegenerateMidline,

    #[error("Region {region} has mismatched contours: {left} left vs {right} right points")]
    RegionMismatch {
        region: &'static str,
        left: usize,
        right: usize,
    },

    #[error("Invalid config value for {field}: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("Face is not frontal (cheek distance ratio {ratio:.2})")]
    NonFrontalFace { ratio: f64 },
}

pub type Result<T> = std::result::Result<T, Error>;

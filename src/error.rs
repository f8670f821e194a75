use thiserror::Error;

#[derive(Error, Debug)]
pub enum PinchError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Parsing Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Invalid Viewport: {width}x{height} (width and height must be positive)")]
    InvalidViewport { width: i32, height: i32 },

    #[error("Layout Validation Error: {0}")]
    Validation(String),

    #[error("Trace Error: {0}")]
    Trace(String),

    #[error("Landmark Provider Error: {0}")]
    Provider(String),
}

pub type PbResult<T> = Result<T, PinchError>;

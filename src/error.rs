use thiserror::Error;

/// Reasons the render loop refuses to run.
#[derive(Debug, Error, PartialEq)]
pub enum EngineError {
    /// The drawable region has no pixels to paint.
    #[error("surface unavailable ({width}x{height})")]
    SurfaceUnavailable { width: f64, height: f64 },
}

/// Errors while reading or writing the config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("config is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

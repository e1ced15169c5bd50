use thiserror::Error;

pub type PlotResult<T> = Result<T, PlotError>;

#[derive(Debug, Error)]
pub enum PlotError {
    #[error("invalid colormap: {0}")]
    InvalidColormap(String),

    #[error("shape mismatch: expected {expected} per-point values, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),
}

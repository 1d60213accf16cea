// src/math/error.rs
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SurfaceError {
    #[error("Failed to load height map '{}': {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Degenerate parameter grid: {rows} rows x {cols} columns (both need at least 2)")]
    DegenerateParameter { rows: usize, cols: usize },

    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },
}

pub type SurfaceResult<T> = Result<T, SurfaceError>;

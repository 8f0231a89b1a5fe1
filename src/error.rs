/*
This code is part of the shape_ingest geospatial library.
Created: 19/10/2026
Last Modified: 19/10/2026
License: MIT
*/
use crate::geometry::GeometryError;
use crate::vector::shapefile::DecodeError;
use crate::wkt::ParseError;

/// Errors from any operation that touches files, the network or archives,
/// wrapping the per-format errors.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("zip archive has no entry ending in '{0}'")]
    MissingRequiredEntry(&'static str),

    #[error("invalid data set URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("unknown data set '{0}'")]
    UnknownDataSet(String),

    #[error("could not build the worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, Error>;

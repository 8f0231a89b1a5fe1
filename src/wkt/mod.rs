/*
This code is part of the shape_ingest geospatial library.
Created: 19/10/2026
Last Modified: 19/10/2026
License: MIT

Notes: A small well-known-text dialect covering POINT, POLYGON, MULTIPOLYGON
and ENVELOPE. Envelopes are written as (minX maxY, maxX minY).
*/
mod parser;
mod writer;

pub use self::parser::{parse, WktParser};
pub use self::writer::to_wkt;

use crate::geometry::GeometryError;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("unknown shape type '{found}'")]
    UnknownShapeType { found: String },

    #[error("expected {expected} at offset {offset}, found '{found}'")]
    Unexpected {
        offset: usize,
        expected: &'static str,
        found: char,
    },

    #[error("unexpected end of input at offset {offset}, expected {expected}")]
    UnexpectedEndOfInput {
        offset: usize,
        expected: &'static str,
    },

    #[error("invalid number '{text}' at offset {offset}")]
    InvalidNumber { offset: usize, text: String },

    #[error("unexpected trailing characters at offset {offset}")]
    TrailingCharacters { offset: usize },

    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

impl ParseError {
    /// The input offset the error was detected at, if it has one.
    pub fn offset(&self) -> Option<usize> {
        match self {
            ParseError::Unexpected { offset, .. }
            | ParseError::UnexpectedEndOfInput { offset, .. }
            | ParseError::InvalidNumber { offset, .. }
            | ParseError::TrailingCharacters { offset } => Some(*offset),
            ParseError::UnknownShapeType { .. } | ParseError::Geometry(_) => None,
        }
    }
}

/*
This code is part of the shape_ingest geospatial library.
Created: 19/10/2026
Last Modified: 19/10/2026
License: MIT

Notes: Reads geographic shapes from WKT text and ESRI Shapefiles and
normalizes them so that they can be compared safely across the antimeridian.
*/
pub mod algorithms;
pub mod configs;
mod error;
pub mod geometry;
pub mod registry;
pub mod remote;
pub mod structures;
pub mod utils;
pub mod vector;
pub mod wkt;

pub use crate::error::{Error, Result};
pub use crate::geometry::{normalize, GeometryError, RawGeometry, RawPolygon};
pub use crate::registry::ShapeRegistry;
pub use crate::remote::{DataSetCatalog, RemoteShapeDataSet};
pub use crate::structures::{Shape, SpatialRelation};
pub use crate::vector::shapefile::{DecodeError, Shapefile};
pub use crate::wkt::{parse, to_wkt, ParseError};

/*
This code is part of the shape_ingest geospatial library.
Created: 19/10/2026
Last Modified: 19/10/2026
License: MIT
*/

/*
Eventually this will be used to support multiple vector formats but
for now it's just Shapefiles.
*/

pub mod shapefile;

pub use crate::vector::shapefile::{
    decode_dbf, decode_shp, AttributeRecord, DecodeError, FieldData, ShapeRecord, ShapeType,
    Shapefile,
};

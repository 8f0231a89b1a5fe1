/*
This code is part of the shape_ingest geospatial library.
Created: 19/10/2026
Last Modified: 19/10/2026
License: MIT

Notes: The logic behind working with the ESRI Shapefile format. A .shp file
holds the geometries and a .dbf file with the same base name holds one
attribute row per geometry, in the same order.
*/
pub mod attributes;
pub mod geometry;

pub use self::attributes::{
    decode_dbf, read_attribute_table, AttributeField, AttributeHeader, AttributeRecord, DateData,
    FieldData, ShapefileAttributes,
};
pub use self::geometry::ShapeType;

use crate::geometry::{normalize, GeometryError, RawGeometry};
use crate::structures::Shape;
use crate::utils::{ByteOrderReader, Endianness, ReadPastEnd};
use crate::wkt::to_wkt;
use serde_json::{json, Value};
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

const FILE_CODE: i32 = 9994;
const VERSION: i32 = 1000;
const HEADER_LENGTH: usize = 100;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DecodeError {
    #[error("header does not have the correct file code: expected 9994 but found {found}")]
    BadFileCode { found: i32 },

    #[error("header does not have the correct version: expected 1000 but found {found}")]
    BadVersion { found: i32 },

    #[error("unsupported shape type {0}")]
    UnsupportedShapeType(i32),

    #[error("record {record} has shape type {found}, expected {expected}")]
    RecordShapeTypeMismatch {
        record: usize,
        expected: i32,
        found: i32,
    },

    #[error("record {record} is malformed: {reason}")]
    MalformedRecord { record: usize, reason: String },

    #[error("unexpected end of data at offset {offset}")]
    Truncated { offset: usize },

    #[error("name field '{0}' not found in the attribute table")]
    NameFieldMissing(String),

    #[error("record {record} has an invalid value '{value}' in field {field}")]
    InvalidFieldValue {
        record: usize,
        field: String,
        value: String,
    },

    #[error("the .shp file has {shp} records but the .dbf file has {dbf}")]
    RecordCountMismatch { shp: usize, dbf: usize },

    #[error("record {record} has invalid geometry: {source}")]
    Geometry {
        record: usize,
        #[source]
        source: GeometryError,
    },
}

// 100 bytes in size
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ShapefileHeader {
    pub file_code: i32,        // BigEndian; value is 9994
    pub file_length: i32,      // BigEndian; in 16-bit words
    pub version: i32,          // LittleEndian
    pub shape_type: ShapeType, // LittleEndian
    pub x_min: f64,            // LittleEndian
    pub y_min: f64,            // LittleEndian
    pub x_max: f64,            // LittleEndian
    pub y_max: f64,            // LittleEndian
}

impl fmt::Display for ShapefileHeader {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "file_code: {}\nfile_length: {}\nversion: {}\nshape_type: {}\nx_min: {}\nx_max: {}\ny_min: {}\ny_max: {}",
            self.file_code,
            self.file_length,
            self.version,
            self.shape_type,
            self.x_min,
            self.x_max,
            self.y_min,
            self.y_max
        )
    }
}

/// Reads and validates the 100-byte main file header.
pub fn read_header(bytes: &[u8]) -> Result<ShapefileHeader, DecodeError> {
    if bytes.len() < HEADER_LENGTH {
        return Err(DecodeError::Truncated {
            offset: bytes.len(),
        });
    }
    let truncated = |e: ReadPastEnd| DecodeError::Truncated { offset: e.offset };

    // Note: the shapefile format uses mixed endianness, so the reader's byte
    // order is switched part way through the header.
    let mut bor = ByteOrderReader::new(&bytes[..HEADER_LENGTH], Endianness::BigEndian);
    let file_code = bor.read_i32().map_err(truncated)?;
    if file_code != FILE_CODE {
        return Err(DecodeError::BadFileCode { found: file_code });
    }
    // five unused ints
    bor.seek(24);
    let file_length = bor.read_i32().map_err(truncated)?;

    // the rest of the header is in LittleEndian format
    bor.byte_order = Endianness::LittleEndian;
    let version = bor.read_i32().map_err(truncated)?;
    if version != VERSION {
        return Err(DecodeError::BadVersion { found: version });
    }
    let code = bor.read_i32().map_err(truncated)?;
    let shape_type = ShapeType::from_int(code).ok_or(DecodeError::UnsupportedShapeType(code))?;

    // bounding box; the z and m ranges that follow are not used
    Ok(ShapefileHeader {
        file_code,
        file_length,
        version,
        shape_type,
        x_min: bor.read_f64().map_err(truncated)?,
        y_min: bor.read_f64().map_err(truncated)?,
        x_max: bor.read_f64().map_err(truncated)?,
        y_max: bor.read_f64().map_err(truncated)?,
    })
}

/// Decodes every record of a .shp file, in file order.
pub fn decode_shp(bytes: &[u8]) -> Result<Vec<RawGeometry>, DecodeError> {
    let header = read_header(bytes)?;
    let mut bor = ByteOrderReader::new(bytes, Endianness::BigEndian);
    bor.seek(HEADER_LENGTH);

    let mut geometries = vec![];
    while bor.remaining() > 0 {
        let record = geometries.len();
        let malformed = |reason: String| DecodeError::MalformedRecord { record, reason };
        if bor.remaining() < 8 {
            return Err(malformed("truncated record header".to_string()));
        }
        // record number is ignored; records are assumed to be in order
        bor.inc_pos(4);
        let content_length = bor
            .read_i32()
            .map_err(|_| malformed("truncated record header".to_string()))?;
        if content_length < 0 {
            return Err(malformed(format!("negative content length {}", content_length)));
        }
        // length is defined as 16-bit words in the file
        let num_bytes = content_length as usize * 2;
        let content = bor.read_bytes(num_bytes).map_err(|e| {
            malformed(format!(
                "content of {} bytes at offset {} runs past the end of the file",
                num_bytes, e.offset
            ))
        })?;
        geometries.push(geometry::decode_record(content, header.shape_type, record)?);
    }
    debug!("decoded {} {} records", geometries.len(), header.shape_type);
    Ok(geometries)
}

/// A normalized shape joined with its attribute row.
#[derive(Debug, Clone)]
pub struct ShapeRecord {
    pub attributes: AttributeRecord,
    pub shape: Shape,
}

impl ShapeRecord {
    pub fn name(&self) -> &str {
        &self.attributes.name
    }

    /// Renders the record as a JSON document: its attributes, the shape as
    /// WKT under `shape` and a `metadata` object naming its source.
    pub fn to_document(&self, shape_field: &str, data_set_id: &str, source_url: &str) -> Value {
        let mut doc = json!({});
        for (name, value) in &self.attributes.fields {
            doc[name.as_str()] = json!(value);
        }
        doc[shape_field] = Value::String(to_wkt(&self.shape));
        doc["metadata"] = json!({
            "data_set_id": data_set_id,
            "source_url": source_url,
        });
        doc
    }
}

/// A decoded .shp/.dbf pair.
#[derive(Debug, Clone)]
pub struct Shapefile {
    pub header: ShapefileHeader,
    pub attributes_header: AttributeHeader,
    pub fields: Vec<AttributeField>,
    pub records: Vec<ShapeRecord>,
}

impl Shapefile {
    /// Decodes both files, normalizes the geometries and joins each named
    /// attribute row to the geometry at the same position.
    pub fn from_bytes(shp: &[u8], dbf: &[u8], name_field: &str) -> Result<Shapefile, DecodeError> {
        let header = read_header(shp)?;
        let geometries = decode_shp(shp)?;
        let attributes = read_attribute_table(dbf, name_field)?;
        let num_dbf = attributes.header.num_records as usize;
        if geometries.len() != num_dbf {
            return Err(DecodeError::RecordCountMismatch {
                shp: geometries.len(),
                dbf: num_dbf,
            });
        }

        let mut records = Vec::with_capacity(attributes.records.len());
        for rec in attributes.records {
            let record = rec.record_index;
            let shape = normalize(&geometries[record])
                .map_err(|source| DecodeError::Geometry { record, source })?;
            records.push(ShapeRecord {
                attributes: rec,
                shape,
            });
        }
        info!(
            "joined {} named shapes out of {} records",
            records.len(),
            geometries.len()
        );
        Ok(Shapefile {
            header,
            attributes_header: attributes.header,
            fields: attributes.fields,
            records,
        })
    }

    /// Reads a .shp file and the .dbf file next to it.
    pub fn read<P: AsRef<Path>>(path: P, name_field: &str) -> crate::Result<Shapefile> {
        let shp_path = path.as_ref();
        let dbf_path = shp_path.with_extension("dbf");
        let shp = fs::read(shp_path)?;
        let dbf = fs::read(&dbf_path)?;
        Ok(Shapefile::from_bytes(&shp, &dbf, name_field)?)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get_record(&self, index: usize) -> Option<&ShapeRecord> {
        self.records.get(index)
    }
}

#[cfg(test)]
mod test {
    use super::{decode_shp, read_header, DecodeError, ShapeType};
    use byteorder::{BigEndian, LittleEndian, WriteBytesExt};

    fn header(file_code: i32, version: i32, shape_type: i32) -> Vec<u8> {
        let mut buf = vec![];
        buf.write_i32::<BigEndian>(file_code).unwrap();
        for _ in 0..5 {
            buf.write_i32::<BigEndian>(0).unwrap();
        }
        buf.write_i32::<BigEndian>(50).unwrap();
        buf.write_i32::<LittleEndian>(version).unwrap();
        buf.write_i32::<LittleEndian>(shape_type).unwrap();
        for _ in 0..8 {
            buf.write_f64::<LittleEndian>(0f64).unwrap();
        }
        buf
    }

    #[test]
    fn test_header_validation() {
        assert_eq!(
            read_header(&header(9995, 1000, 5)),
            Err(DecodeError::BadFileCode { found: 9995 })
        );
        assert_eq!(
            read_header(&header(9994, 999, 5)),
            Err(DecodeError::BadVersion { found: 999 })
        );
        assert_eq!(
            read_header(&header(9994, 1000, 3)),
            Err(DecodeError::UnsupportedShapeType(3))
        );
        assert_eq!(read_header(&header(9994, 1000, 1)).unwrap().shape_type, ShapeType::Point);
        assert_eq!(
            read_header(&[0u8; 20]),
            Err(DecodeError::Truncated { offset: 20 })
        );
    }

    #[test]
    fn test_point_records() {
        let mut buf = header(9994, 1000, 1);
        for (i, (x, y)) in [(1.5, 2.5), (-170.0, 45.0)].iter().enumerate() {
            buf.write_i32::<BigEndian>(i as i32 + 1).unwrap();
            buf.write_i32::<BigEndian>(10).unwrap();
            buf.write_i32::<LittleEndian>(1).unwrap();
            buf.write_f64::<LittleEndian>(*x).unwrap();
            buf.write_f64::<LittleEndian>(*y).unwrap();
        }
        let geometries = decode_shp(&buf).unwrap();
        assert_eq!(geometries.len(), 2);
        assert!(decode_shp(&header(9994, 1000, 1)).unwrap().is_empty());

        // a record whose content runs past the end of the file
        buf.truncate(buf.len() - 4);
        assert!(matches!(
            decode_shp(&buf),
            Err(DecodeError::MalformedRecord { record: 1, .. })
        ));
    }
}

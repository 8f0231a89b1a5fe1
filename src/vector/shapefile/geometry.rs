/*
This file is part of the shape_ingest geospatial library.
Created: 19/10/2026
Last Modified: 19/10/2026
License: MIT

Notes: Decoding of individual .shp record contents. Only Point and Polygon
records are supported.
*/
use super::DecodeError;
use crate::geometry::{RawGeometry, RawPolygon};
use crate::structures::Point2D;
use crate::utils::{ByteOrderReader, Endianness};
use std::fmt;

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ShapeType {
    Point,
    Polygon,
}

impl ShapeType {
    pub fn from_int(value: i32) -> Option<ShapeType> {
        match value {
            1 => Some(ShapeType::Point),
            5 => Some(ShapeType::Polygon),
            _ => None,
        }
    }

    pub fn to_int(&self) -> i32 {
        match self {
            ShapeType::Point => 1,
            ShapeType::Polygon => 5,
        }
    }
}

impl Default for ShapeType {
    fn default() -> ShapeType {
        ShapeType::Polygon
    }
}

impl fmt::Display for ShapeType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let printable = match *self {
            ShapeType::Point => "Point",
            ShapeType::Polygon => "Polygon",
        };
        write!(f, "{}", printable)
    }
}

/// Decodes the content of one record, excluding its 8-byte record header.
pub(crate) fn decode_record(
    content: &[u8],
    shape_type: ShapeType,
    record: usize,
) -> Result<RawGeometry, DecodeError> {
    let mut bor = ByteOrderReader::new(content, Endianness::LittleEndian);
    let malformed = |reason: String| DecodeError::MalformedRecord { record, reason };
    let short = |_| malformed("content is shorter than its fields require".to_string());

    let found = bor.read_i32().map_err(short)?;
    if found != shape_type.to_int() {
        return Err(DecodeError::RecordShapeTypeMismatch {
            record,
            expected: shape_type.to_int(),
            found,
        });
    }

    match shape_type {
        ShapeType::Point => {
            let x = bor.read_f64().map_err(short)?;
            let y = bor.read_f64().map_err(short)?;
            Ok(RawGeometry::Point(Point2D::new(x, y)))
        }
        ShapeType::Polygon => {
            // the record's bounding box isn't needed
            bor.inc_pos(32);
            let num_parts = bor.read_i32().map_err(short)?;
            let num_points = bor.read_i32().map_err(short)?;
            if num_parts < 1 || num_points < 0 {
                return Err(malformed(format!(
                    "invalid part count {} or point count {}",
                    num_parts, num_points
                )));
            }
            let (num_parts, num_points) = (num_parts as usize, num_points as usize);
            // each part index takes 4 bytes and each point 16
            if bor.remaining() < num_parts * 4 + num_points * 16 {
                return Err(malformed(format!(
                    "{} parts and {} points do not fit in the record",
                    num_parts, num_points
                )));
            }

            let mut parts = Vec::with_capacity(num_parts);
            for _ in 0..num_parts {
                parts.push(bor.read_i32().map_err(short)?);
            }
            let mut prev: i64 = -1;
            for &part in &parts {
                if (part as i64) <= prev || part as i64 >= num_points as i64 {
                    return Err(malformed(format!(
                        "part index {} is out of order or out of range",
                        part
                    )));
                }
                prev = part as i64;
            }

            let mut points = Vec::with_capacity(num_points);
            for _ in 0..num_points {
                let x = bor.read_f64().map_err(short)?;
                let y = bor.read_f64().map_err(short)?;
                points.push(Point2D::new(x, y));
            }

            // Walk the parts from last to first. The first part is the shell
            // and the remaining parts are holes, in reverse order.
            let mut last = points.len();
            let mut rings = Vec::with_capacity(num_parts);
            for &part in parts.iter().rev() {
                rings.push(points[part as usize..last].to_vec());
                last = part as usize;
            }
            let shell = rings.pop().unwrap_or_default();
            Ok(RawGeometry::Polygon(RawPolygon {
                shell,
                holes: rings,
            }))
        }
    }
}

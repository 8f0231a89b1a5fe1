/*
This file is part of the shape_ingest geospatial library.
Created: 19/10/2026
Last Modified: 19/10/2026
License: MIT

NOTE: Structures and functions for handling the Shapefile attribute table info
contained with the associated .dbf file.
*/
use super::DecodeError;
use crate::utils::{ByteOrderReader, Endianness, ReadPastEnd};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;
use tracing::debug;

const FIELD_DESCRIPTOR_TERMINATOR: u8 = 0x0d;
const DELETED_RECORD_FLAG: u8 = 0x2A;

#[derive(Debug, Default, Clone)]
pub struct AttributeHeader {
    pub version: u8,
    pub year: u32,
    pub month: u8,
    pub day: u8,
    pub num_records: u32,
    pub num_fields: u32, // not actually stored in file but derived
    pub bytes_in_header: u16,
    pub bytes_in_record: u16,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DateData {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

impl fmt::Display for DateData {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldData {
    Int64(i64),
    Real(f64),
    Text(String),
    Date(DateData),
    Bool(bool),
    Null,
}

impl FieldData {
    /// True for nulls and for text that is only whitespace.
    pub fn is_blank(&self) -> bool {
        match self {
            FieldData::Null => true,
            FieldData::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }
}

impl fmt::Display for FieldData {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FieldData::Int64(v) => write!(f, "{}", v),
            FieldData::Real(v) => write!(f, "{}", v),
            FieldData::Text(v) => write!(f, "{}", v),
            FieldData::Date(v) => write!(f, "{}", v),
            FieldData::Bool(v) => write!(f, "{}", v),
            FieldData::Null => write!(f, ""),
        }
    }
}

impl Serialize for FieldData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldData::Int64(v) => serializer.serialize_i64(*v),
            FieldData::Real(v) => serializer.serialize_f64(*v),
            FieldData::Text(v) => serializer.serialize_str(v),
            FieldData::Date(v) => serializer.collect_str(v),
            FieldData::Bool(v) => serializer.serialize_bool(*v),
            FieldData::Null => serializer.serialize_none(),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct AttributeField {
    pub name: String,
    pub field_type: char,
    pub field_length: u8,
    pub decimal_count: u8,
}

impl AttributeField {
    pub fn new(name: &str, field_type: char, field_length: u8, decimal_count: u8) -> AttributeField {
        AttributeField {
            name: name.to_string(),
            field_type,
            field_length,
            decimal_count,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self.field_type, 'N' | 'F' | 'I' | 'O')
    }
}

/// One row of the attribute table, in field order.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeRecord {
    /// The row's position in the .dbf file, which is also the position of
    /// its geometry in the .shp file.
    pub record_index: usize,
    /// The value of the name field, trimmed.
    pub name: String,
    pub fields: Vec<(String, FieldData)>,
}

impl AttributeRecord {
    /// Looks up a field value by name, ignoring case.
    pub fn get(&self, name: &str) -> Option<&FieldData> {
        self.fields
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v)
    }
}

impl Serialize for AttributeRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[derive(Debug, Default, Clone)]
pub struct ShapefileAttributes {
    pub header: AttributeHeader,
    pub fields: Vec<AttributeField>,
    pub name_field: usize,
    pub records: Vec<AttributeRecord>,
}

impl ShapefileAttributes {
    pub fn get_field_num(&self, name: &str) -> Option<usize> {
        self.fields
            .iter()
            .position(|f| f.name.eq_ignore_ascii_case(name))
    }
}

/// Decodes a .dbf table and returns the records that have a name.
pub fn decode_dbf(bytes: &[u8], name_field: &str) -> Result<Vec<AttributeRecord>, DecodeError> {
    Ok(read_attribute_table(bytes, name_field)?.records)
}

/// Decodes a .dbf table. Deleted rows and rows with a blank name are left
/// out, but the kept rows remember their original positions.
pub fn read_attribute_table(
    bytes: &[u8],
    name_field: &str,
) -> Result<ShapefileAttributes, DecodeError> {
    let truncated = |e: ReadPastEnd| DecodeError::Truncated { offset: e.offset };
    let mut bor = ByteOrderReader::new(bytes, Endianness::LittleEndian);
    let mut attributes = ShapefileAttributes::default();

    let header = &mut attributes.header;
    header.version = bor.read_u8().map_err(truncated)?;
    header.year = 1900u32 + bor.read_u8().map_err(truncated)? as u32;
    header.month = bor.read_u8().map_err(truncated)?;
    header.day = bor.read_u8().map_err(truncated)?;
    header.num_records = bor.read_u32().map_err(truncated)?;
    header.bytes_in_header = bor.read_u16().map_err(truncated)?;
    header.bytes_in_record = bor.read_u16().map_err(truncated)?;
    // reserved bytes, transaction and encryption flags, mdx flag, language driver
    bor.seek(32);

    // read the field descriptors up to the terminator (0x0d)
    while bor.peek_u8().map_err(truncated)? != FIELD_DESCRIPTOR_TERMINATOR {
        let name = bor
            .read_utf8(11)
            .map_err(truncated)?
            .replace(char::from(0), "")
            .trim()
            .to_string();
        let field_type = char::from(bor.read_u8().map_err(truncated)?);
        // field data address
        bor.inc_pos(4);
        let field_length = bor.read_u8().map_err(truncated)?;
        let decimal_count = bor.read_u8().map_err(truncated)?;
        // reserved bytes
        bor.inc_pos(14);
        attributes
            .fields
            .push(AttributeField::new(&name, field_type, field_length, decimal_count));
    }
    attributes.header.num_fields = attributes.fields.len() as u32;

    attributes.name_field = attributes
        .get_field_num(name_field)
        .ok_or_else(|| DecodeError::NameFieldMissing(name_field.to_string()))?;

    let header_len = attributes.header.bytes_in_header as usize;
    let record_len = attributes.header.bytes_in_record as usize;
    let fields_len: usize = attributes.fields.iter().map(|f| f.field_length as usize).sum();
    if record_len < fields_len + 1 {
        return Err(DecodeError::MalformedRecord {
            record: 0,
            reason: format!(
                "record length {} is shorter than its fields ({} bytes)",
                record_len,
                fields_len + 1
            ),
        });
    }

    for i in 0..attributes.header.num_records as usize {
        bor.seek(header_len + i * record_len);
        let deleted = bor.read_u8().map_err(truncated)? == DELETED_RECORD_FLAG;
        let mut values = Vec::with_capacity(attributes.fields.len());
        for field in &attributes.fields {
            let raw = bor
                .read_utf8(field.field_length as usize)
                .map_err(truncated)?
                .replace(char::from(0), "");
            values.push((field.name.clone(), decode_value(field, raw.trim(), i)?));
        }
        if deleted {
            debug!("skipping deleted record {}", i);
            continue;
        }
        let name_value = &values[attributes.name_field].1;
        if name_value.is_blank() {
            debug!("skipping record {} with a blank name", i);
            continue;
        }
        attributes.records.push(AttributeRecord {
            record_index: i,
            name: name_value.to_string().trim().to_string(),
            fields: values,
        });
    }

    Ok(attributes)
}

fn decode_value(field: &AttributeField, value: &str, record: usize) -> Result<FieldData, DecodeError> {
    if value.replace('?', "").is_empty() {
        return Ok(FieldData::Null);
    }
    let invalid = || DecodeError::InvalidFieldValue {
        record,
        field: field.name.clone(),
        value: value.to_string(),
    };
    match field.field_type {
        'N' | 'F' | 'I' | 'O' => {
            if field.decimal_count == 0 {
                if let Ok(v) = value.parse::<i64>() {
                    return Ok(FieldData::Int64(v));
                }
            }
            value
                .parse::<f64>()
                .map(FieldData::Real)
                .map_err(|_| invalid())
        }
        'D' => {
            if value.len() != 8 || !value.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            Ok(FieldData::Date(DateData {
                year: value[0..4].parse::<u16>().map_err(|_| invalid())?,
                month: value[4..6].parse::<u8>().map_err(|_| invalid())?,
                day: value[6..8].parse::<u8>().map_err(|_| invalid())?,
            }))
        }
        'L' => match value.chars().next() {
            Some('T') | Some('t') | Some('Y') | Some('y') => Ok(FieldData::Bool(true)),
            Some('F') | Some('f') | Some('N') | Some('n') => Ok(FieldData::Bool(false)),
            _ => Err(invalid()),
        },
        // treat it like a string
        _ => Ok(FieldData::Text(value.to_string())),
    }
}

#[cfg(test)]
mod test {
    use super::{decode_dbf, read_attribute_table, FieldData};
    use crate::vector::shapefile::DecodeError;
    use byteorder::{LittleEndian, WriteBytesExt};

    /// Builds a small table with a NAME (C, 10) and a POP (N, 8) field.
    fn table(rows: &[(bool, &str, &str)]) -> Vec<u8> {
        let mut buf = vec![3u8, 118, 10, 19];
        buf.write_u32::<LittleEndian>(rows.len() as u32).unwrap();
        buf.write_u16::<LittleEndian>(32 + 2 * 32 + 1).unwrap();
        buf.write_u16::<LittleEndian>(1 + 10 + 8).unwrap();
        buf.resize(32, 0);
        for (name, field_type, len) in [("NAME", b'C', 10u8), ("POP", b'N', 8u8)].iter() {
            let mut descriptor = name.as_bytes().to_vec();
            descriptor.resize(11, 0);
            descriptor.push(*field_type);
            descriptor.extend_from_slice(&[0, 0, 0, 0, *len, 0]);
            descriptor.resize(32, 0);
            buf.extend(descriptor);
        }
        buf.push(0x0d);
        for (deleted, name, pop) in rows {
            buf.push(if *deleted { b'*' } else { b' ' });
            buf.extend(format!("{:<10}", name).bytes());
            buf.extend(format!("{:>8}", pop).bytes());
        }
        buf.push(0x1a);
        buf
    }

    #[test]
    fn test_decode_dbf() {
        let bytes = table(&[
            (false, "Fiji", "920938"),
            (false, "   ", "1"),
            (true, "Gone", "2"),
            (false, "Tanzania", ""),
        ]);
        let records = decode_dbf(&bytes, "name").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].record_index, 0);
        assert_eq!(records[0].name, "Fiji");
        assert_eq!(records[0].get("pop"), Some(&FieldData::Int64(920938)));
        assert_eq!(records[1].record_index, 3);
        assert_eq!(records[1].get("POP"), Some(&FieldData::Null));

        let json = serde_json::to_string(&records[0]).unwrap();
        assert_eq!(json, r#"{"NAME":"Fiji","POP":920938}"#);
    }

    #[test]
    fn test_header() {
        let bytes = table(&[(false, "Fiji", "1")]);
        let attributes = read_attribute_table(&bytes, "NAME").unwrap();
        assert_eq!(attributes.header.year, 2018);
        assert_eq!(attributes.header.num_records, 1);
        assert_eq!(attributes.fields.len(), 2);
        assert_eq!(attributes.fields[1].field_type, 'N');
        assert!(attributes.fields[1].is_numeric());
    }

    #[test]
    fn test_errors() {
        let bytes = table(&[(false, "Fiji", "1")]);
        assert_eq!(
            decode_dbf(&bytes, "admin"),
            Err(DecodeError::NameFieldMissing("admin".to_string()))
        );

        let bytes = table(&[(false, "Fiji", "1x")]);
        assert!(matches!(
            decode_dbf(&bytes, "name"),
            Err(DecodeError::InvalidFieldValue { record: 0, .. })
        ));

        let bytes = table(&[(false, "Fiji", "1")]);
        assert!(matches!(
            decode_dbf(&bytes[..40], "name"),
            Err(DecodeError::Truncated { .. })
        ));
    }
}

/*
This code is part of the shape_ingest geospatial library.
Created: 19/10/2026
Last Modified: 19/10/2026
License: MIT
*/
#![allow(dead_code)]

use byteorder::{BigEndian, LittleEndian, WriteBytesExt};
use std::fs;
use std::io::{Cursor, Write};
use std::path::Path;
use zip::write::{FileOptions, ZipWriter};

/// A ring crossing the antimeridian the way it is stored in a shapefile,
/// wrapped into -180..180.
pub fn fiji_ring() -> Vec<(f64, f64)> {
    vec![
        (178.0, -17.0),
        (178.0, -15.0),
        (-179.0, -15.0),
        (-179.0, -17.0),
        (178.0, -17.0),
    ]
}

pub fn square_ring(x: f64, y: f64, size: f64) -> Vec<(f64, f64)> {
    vec![
        (x, y),
        (x, y + size),
        (x + size, y + size),
        (x + size, y),
        (x, y),
    ]
}

/// Builds a polygon .shp file with one single-part record per ring.
pub fn polygon_shp(rings: &[Vec<(f64, f64)>]) -> Vec<u8> {
    let mut records = vec![];
    for (i, ring) in rings.iter().enumerate() {
        let mut content = vec![];
        content.write_i32::<LittleEndian>(5).unwrap();
        for _ in 0..4 {
            content.write_f64::<LittleEndian>(0f64).unwrap();
        }
        content.write_i32::<LittleEndian>(1).unwrap();
        content.write_i32::<LittleEndian>(ring.len() as i32).unwrap();
        content.write_i32::<LittleEndian>(0).unwrap();
        for (x, y) in ring {
            content.write_f64::<LittleEndian>(*x).unwrap();
            content.write_f64::<LittleEndian>(*y).unwrap();
        }
        records.write_i32::<BigEndian>(i as i32 + 1).unwrap();
        records.write_i32::<BigEndian>(content.len() as i32 / 2).unwrap();
        records.extend(content);
    }

    let mut buf = vec![];
    buf.write_i32::<BigEndian>(9994).unwrap();
    for _ in 0..5 {
        buf.write_i32::<BigEndian>(0).unwrap();
    }
    buf.write_i32::<BigEndian>((100 + records.len()) as i32 / 2).unwrap();
    buf.write_i32::<LittleEndian>(1000).unwrap();
    buf.write_i32::<LittleEndian>(5).unwrap();
    for v in [-180f64, -90f64, 180f64, 90f64, 0f64, 0f64, 0f64, 0f64].iter() {
        buf.write_f64::<LittleEndian>(*v).unwrap();
    }
    buf.extend(records);
    buf
}

/// Builds a .dbf table with a `name` (C, 16) and a `pop_est` (N, 10) field.
pub fn dbf(rows: &[(&str, &str)]) -> Vec<u8> {
    let mut buf = vec![3u8, 124, 1, 1];
    buf.write_u32::<LittleEndian>(rows.len() as u32).unwrap();
    buf.write_u16::<LittleEndian>(32 + 2 * 32 + 1).unwrap();
    buf.write_u16::<LittleEndian>(1 + 16 + 10).unwrap();
    buf.resize(32, 0);
    for (name, field_type, len) in [("name", b'C', 16u8), ("pop_est", b'N', 10u8)].iter() {
        let mut descriptor = name.as_bytes().to_vec();
        descriptor.resize(11, 0);
        descriptor.push(*field_type);
        descriptor.extend_from_slice(&[0, 0, 0, 0, *len, 0]);
        descriptor.resize(32, 0);
        buf.extend(descriptor);
    }
    buf.push(0x0d);
    for (name, pop) in rows {
        buf.push(b' ');
        buf.extend(format!("{:<16}", name).bytes());
        buf.extend(format!("{:>10}", pop).bytes());
    }
    buf.push(0x1a);
    buf
}

/// Fiji crossing the dateline, an unnamed row and a plain square.
pub fn sample_pair() -> (Vec<u8>, Vec<u8>) {
    let shp = polygon_shp(&[
        fiji_ring(),
        square_ring(10.0, 10.0, 1.0),
        square_ring(-60.0, -10.0, 5.0),
    ]);
    let dbf = dbf(&[("Fiji", "920938"), ("", "0"), ("Square", "42")]);
    (shp, dbf)
}

pub fn write_pair(dir: &Path, base: &str, shp: &[u8], dbf: &[u8]) {
    fs::write(dir.join(format!("{}.shp", base)), shp).unwrap();
    fs::write(dir.join(format!("{}.dbf", base)), dbf).unwrap();
}

pub fn zip_pair(shp: &[u8], dbf: &[u8]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    writer.start_file("countries/countries.prj", FileOptions::default()).unwrap();
    writer.write_all(b"GEOGCS[\"GCS_WGS_1984\"]").unwrap();
    writer.start_file("countries/countries.shp", FileOptions::default()).unwrap();
    writer.write_all(shp).unwrap();
    writer.start_file("countries/countries.dbf", FileOptions::default()).unwrap();
    writer.write_all(dbf).unwrap();
    writer.finish().unwrap().into_inner()
}

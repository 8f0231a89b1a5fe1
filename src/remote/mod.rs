/*
This code is part of the shape_ingest geospatial library.
Created: 19/10/2026
Last Modified: 19/10/2026
License: MIT

Notes: Remote data sets are zipped shapefile pairs. The archive is fetched in
one blocking request, the .shp and .dbf entries are located by suffix and the
decoded records are handed back joined and normalized.
*/
use crate::error::Error;
use crate::vector::shapefile::{ShapeRecord, Shapefile};
use reqwest::Url;
use serde_json::Value;
use std::fs;
use std::io::{Cursor, Read};
use std::time::Duration;
use tracing::{debug, info};
use zip::ZipArchive;

/// The document key holding a record's shape.
pub const SHAPE_FIELD: &str = "shape";

/// Upper bound on the buffer reserved up front for an archive entry; the
/// declared size in the archive is not trusted beyond it.
const MAX_ENTRY_RESERVE: u64 = 64 * 1024 * 1024;

pub const NATURAL_EARTH_COUNTRIES_ID: &str = "natural_earth_data_countries";
pub const NATURAL_EARTH_COUNTRIES_URL: &str =
    "http://www.naturalearthdata.com/http//www.naturalearthdata.com/download/110m/cultural/110m-admin-0-countries.zip";

/// A zipped shapefile pair reachable through a URL.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteShapeDataSet {
    id: String,
    url: Url,
    name_field: String,
}

impl RemoteShapeDataSet {
    pub fn new(id: &str, url: &str, name_field: &str) -> crate::Result<RemoteShapeDataSet> {
        let url = Url::parse(url).map_err(|e| Error::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        match url.scheme() {
            "http" | "https" | "file" => {}
            other => {
                return Err(Error::InvalidUrl {
                    url: url.to_string(),
                    reason: format!("unsupported scheme '{}'", other),
                })
            }
        }
        Ok(RemoteShapeDataSet {
            id: id.to_string(),
            url,
            name_field: name_field.to_string(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    pub fn name_field(&self) -> &str {
        &self.name_field
    }

    /// Fetches the archive and returns its named records with normalized
    /// shapes, in file order.
    pub fn shape_data(&self, timeout: Duration) -> crate::Result<Vec<ShapeRecord>> {
        let archive = self.fetch(timeout)?;
        debug!("{} bytes read from {}", archive.len(), self.url);
        let (shp, dbf) = extract_pair(&archive)?;
        let shapefile = Shapefile::from_bytes(&shp, &dbf, &self.name_field)?;
        info!(
            "data set '{}' yielded {} shapes",
            self.id,
            shapefile.records.len()
        );
        Ok(shapefile.records)
    }

    /// The records rendered as JSON documents, ready to be indexed.
    pub fn documents(&self, timeout: Duration) -> crate::Result<Vec<Value>> {
        Ok(self
            .shape_data(timeout)?
            .iter()
            .map(|r| r.to_document(SHAPE_FIELD, &self.id, self.url.as_str()))
            .collect())
    }

    fn fetch(&self, timeout: Duration) -> crate::Result<Vec<u8>> {
        if self.url.scheme() == "file" {
            let path = self.url.to_file_path().map_err(|_| Error::InvalidUrl {
                url: self.url.to_string(),
                reason: "not a local file path".to_string(),
            })?;
            return Ok(fs::read(path)?);
        }
        info!("downloading {}", self.url);
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        let resp = client.get(self.url.clone()).send()?.error_for_status()?;
        Ok(resp.bytes()?.to_vec())
    }
}

/// Pulls the first entries ending in .shp and .dbf out of a zip archive.
pub fn extract_pair(archive: &[u8]) -> crate::Result<(Vec<u8>, Vec<u8>)> {
    let mut zip = ZipArchive::new(Cursor::new(archive))?;
    let mut shp_name = None;
    let mut dbf_name = None;
    for name in zip.file_names() {
        let lower = name.to_lowercase();
        if shp_name.is_none() && lower.ends_with(".shp") {
            shp_name = Some(name.to_string());
        } else if dbf_name.is_none() && lower.ends_with(".dbf") {
            dbf_name = Some(name.to_string());
        }
    }
    let shp_name = shp_name.ok_or(Error::MissingRequiredEntry(".shp"))?;
    let dbf_name = dbf_name.ok_or(Error::MissingRequiredEntry(".dbf"))?;
    let shp = read_entry(&mut zip, &shp_name)?;
    let dbf = read_entry(&mut zip, &dbf_name)?;
    Ok((shp, dbf))
}

fn read_entry(zip: &mut ZipArchive<Cursor<&[u8]>>, name: &str) -> crate::Result<Vec<u8>> {
    let mut f = zip.by_name(name)?;
    let mut buffer = Vec::with_capacity(f.size().min(MAX_ENTRY_RESERVE) as usize);
    f.read_to_end(&mut buffer)?;
    Ok(buffer)
}

/// The data sets known to the application, in registration order.
#[derive(Debug, Default, Clone)]
pub struct DataSetCatalog {
    data_sets: Vec<RemoteShapeDataSet>,
}

impl DataSetCatalog {
    pub fn new() -> DataSetCatalog {
        DataSetCatalog::default()
    }

    /// A catalog holding the Natural Earth 1:110m countries.
    pub fn with_defaults() -> crate::Result<DataSetCatalog> {
        let mut catalog = DataSetCatalog::new();
        catalog.register(RemoteShapeDataSet::new(
            NATURAL_EARTH_COUNTRIES_ID,
            NATURAL_EARTH_COUNTRIES_URL,
            "name",
        )?);
        Ok(catalog)
    }

    /// Adds a data set, replacing one with the same id.
    pub fn register(&mut self, data_set: RemoteShapeDataSet) {
        match self.data_sets.iter_mut().find(|d| d.id == data_set.id) {
            Some(existing) => *existing = data_set,
            None => self.data_sets.push(data_set),
        }
    }

    pub fn data_sets(&self) -> &[RemoteShapeDataSet] {
        &self.data_sets
    }

    pub fn data_set(&self, id: &str) -> crate::Result<&RemoteShapeDataSet> {
        self.data_sets
            .iter()
            .find(|d| d.id == id)
            .ok_or_else(|| Error::UnknownDataSet(id.to_string()))
    }
}

#[cfg(test)]
mod test {
    use super::{extract_pair, DataSetCatalog, RemoteShapeDataSet, NATURAL_EARTH_COUNTRIES_ID};
    use crate::error::Error;
    use std::io::{Cursor, Write};
    use zip::write::{FileOptions, ZipWriter};

    fn zip_of(entries: &[(&str, &[u8])]) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, data) in entries {
            writer.start_file(*name, FileOptions::default()).unwrap();
            writer.write_all(data).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_extract_pair_by_suffix() {
        let archive = zip_of(&[
            ("countries/README.txt", b"readme"),
            ("countries/Countries.SHP", b"shp bytes"),
            ("countries/countries.dbf", b"dbf bytes"),
        ]);
        let (shp, dbf) = extract_pair(&archive).unwrap();
        assert_eq!(shp, b"shp bytes".to_vec());
        assert_eq!(dbf, b"dbf bytes".to_vec());
    }

    #[test]
    fn test_declared_entry_size_is_not_trusted() {
        let mut archive = zip_of(&[("a.shp", b"shp bytes"), ("a.dbf", b"dbf bytes")]);
        // uncompressed size of the first central directory record
        let central = archive
            .windows(4)
            .position(|w| w == [0x50, 0x4b, 0x01, 0x02])
            .unwrap();
        archive[central + 24..central + 28].copy_from_slice(&0xffff_fff0u32.to_le_bytes());
        let (shp, dbf) = extract_pair(&archive).unwrap();
        assert_eq!(shp, b"shp bytes".to_vec());
        assert_eq!(dbf, b"dbf bytes".to_vec());
    }

    #[test]
    fn test_missing_entries() {
        let archive = zip_of(&[("a.shp", b"x")]);
        match extract_pair(&archive) {
            Err(Error::MissingRequiredEntry(".dbf")) => {}
            other => panic!("unexpected {:?}", other),
        }
        let archive = zip_of(&[("a.dbf", b"x")]);
        match extract_pair(&archive) {
            Err(Error::MissingRequiredEntry(".shp")) => {}
            other => panic!("unexpected {:?}", other),
        }
        assert!(matches!(extract_pair(b"not a zip"), Err(Error::Zip(_))));
    }

    #[test]
    fn test_catalog() {
        let mut catalog = DataSetCatalog::with_defaults().unwrap();
        assert_eq!(catalog.data_sets().len(), 1);
        assert_eq!(
            catalog.data_set(NATURAL_EARTH_COUNTRIES_ID).unwrap().name_field(),
            "name"
        );
        catalog.register(RemoteShapeDataSet::new("local", "file:///tmp/a.zip", "NAME").unwrap());
        catalog.register(RemoteShapeDataSet::new("local", "file:///tmp/b.zip", "NAME").unwrap());
        assert_eq!(catalog.data_sets().len(), 2);
        assert_eq!(catalog.data_set("local").unwrap().url(), "file:///tmp/b.zip");
        assert!(matches!(catalog.data_set("nope"), Err(Error::UnknownDataSet(_))));
    }

    #[test]
    fn test_invalid_urls() {
        assert!(matches!(
            RemoteShapeDataSet::new("x", "not a url", "name"),
            Err(Error::InvalidUrl { .. })
        ));
        assert!(matches!(
            RemoteShapeDataSet::new("x", "ftp://host/a.zip", "name"),
            Err(Error::InvalidUrl { .. })
        ));
    }
}

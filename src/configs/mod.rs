/*
This code is part of the shape_ingest geospatial library.
Created: 19/10/2026
Last Modified: 19/10/2026
License: MIT
*/
use serde_derive::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const SETTINGS_FILE: &str = "settings.json";

/// How a preload file separates a shape's name from its WKT.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LineDelimiter {
    /// `name:WKT`
    Colon,
    /// `name WKT`, split at the first run of whitespace
    Whitespace,
}

impl LineDelimiter {
    /// Splits a line into its name and WKT parts.
    pub fn split<'a>(&self, line: &'a str) -> Option<(&'a str, &'a str)> {
        let (name, wkt) = match self {
            LineDelimiter::Colon => line.split_once(':')?,
            LineDelimiter::Whitespace => line.trim_start().split_once(char::is_whitespace)?,
        };
        Some((name.trim(), wkt.trim()))
    }
}

/// A structure to hold environment settings. Backed by a settings.json file.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Configs {
    pub verbose_mode: bool,
    /// Directory of shape definition files loaded into the registry at startup.
    pub shapes_directory: Option<PathBuf>,
    pub line_delimiter: LineDelimiter,
    /// The .dbf field holding each shape's name.
    pub name_field: String,
    /// Worker threads for preloading; -1 uses every core.
    pub max_procs: isize,
    pub fetch_timeout_secs: u64,
}

impl Default for Configs {
    fn default() -> Configs {
        Configs {
            verbose_mode: false,
            shapes_directory: None,
            line_delimiter: LineDelimiter::Colon,
            name_field: "name".to_string(),
            max_procs: -1,
            fetch_timeout_secs: 90,
        }
    }
}

impl Configs {
    pub fn new() -> Configs {
        Configs::default()
    }

    /// The number of worker threads to use.
    pub fn num_procs(&self) -> usize {
        if self.max_procs > 0 {
            self.max_procs as usize
        } else {
            num_cpus::get()
        }
    }
}

/// Reads the settings file, falling back to the defaults when it doesn't
/// exist. A file that exists but can't be parsed is an error.
pub fn get_configs<P: AsRef<Path>>(config_file: P) -> crate::Result<Configs> {
    match fs::read_to_string(config_file.as_ref()) {
        Ok(contents) => Ok(serde_json::from_str(&contents)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Configs::new()),
        Err(e) => Err(e.into()),
    }
}

pub fn save_configs<P: AsRef<Path>>(configs: &Configs, config_file: P) -> crate::Result<()> {
    let configs_json = serde_json::to_string_pretty(configs)?;
    fs::write(config_file, configs_json)?;
    Ok(())
}

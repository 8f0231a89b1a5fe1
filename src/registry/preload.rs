/*
This code is part of the shape_ingest geospatial library.
Created: 19/10/2026
Last Modified: 19/10/2026
License: MIT
*/
use super::ShapeRegistry;
use crate::configs::Configs;
use crate::structures::Shape;
use crate::utils::get_formatted_elapsed_time;
use crate::vector::shapefile::Shapefile;
use crate::wkt::WktParser;
use rayon::prelude::*;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, warn};

/// Files that accompany a .shp file and are never read as definitions.
const SHAPEFILE_COMPANIONS: [&str; 5] = ["dbf", "shx", "prj", "cpg", "sbn"];

#[derive(Debug, Default, Clone, PartialEq)]
pub struct PreloadSummary {
    pub files: usize,
    pub shapes: usize,
    pub skipped_lines: usize,
    pub failed_files: usize,
    pub elapsed: String,
}

impl fmt::Display for PreloadSummary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "preloaded {} shapes from {} files ({} lines skipped, {} files failed) in {}",
            self.shapes, self.files, self.skipped_lines, self.failed_files, self.elapsed
        )
    }
}

enum Source {
    Definitions(PathBuf),
    Shapefile(PathBuf),
}

impl Source {
    fn path(&self) -> &Path {
        match self {
            Source::Definitions(p) | Source::Shapefile(p) => p,
        }
    }
}

#[derive(Default)]
struct Loaded {
    shapes: Vec<(String, Shape)>,
    skipped_lines: usize,
}

pub(super) fn preload(
    registry: &ShapeRegistry,
    dir: &Path,
    configs: &Configs,
) -> crate::Result<PreloadSummary> {
    let start = Instant::now();
    let sources = collect_sources(dir)?;
    debug!("found {} shape sources under {}", sources.len(), dir.display());

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(configs.num_procs())
        .build()?;
    let results: Vec<crate::Result<Loaded>> =
        pool.install(|| sources.par_iter().map(|s| load(s, configs)).collect());

    // merged in path order, so a later file wins a name clash
    let mut summary = PreloadSummary {
        files: sources.len(),
        ..Default::default()
    };
    for (source, result) in sources.iter().zip(results) {
        match result {
            Ok(loaded) => {
                summary.skipped_lines += loaded.skipped_lines;
                summary.shapes += loaded.shapes.len();
                for (name, shape) in loaded.shapes {
                    registry.add(&name, shape, true);
                }
            }
            Err(e) => {
                warn!("could not read {}: {}", source.path().display(), e);
                summary.failed_files += 1;
            }
        }
    }
    summary.elapsed = get_formatted_elapsed_time(start);
    Ok(summary)
}

/// Walks the directory tree with an explicit work queue. Entries are visited
/// in sorted order. An unreadable subdirectory is logged and skipped; an
/// unreadable root is an error.
fn collect_sources(root: &Path) -> crate::Result<Vec<Source>> {
    let mut sources = vec![];
    let mut queue = vec![root.to_path_buf()];
    while let Some(dir) = queue.pop() {
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if dir == root => return Err(e.into()),
            Err(e) => {
                warn!("could not read directory {}: {}", dir.display(), e);
                continue;
            }
        };
        let mut paths: Vec<PathBuf> = entries.filter_map(|e| e.ok().map(|e| e.path())).collect();
        paths.sort();
        let mut subdirs = vec![];
        for path in paths {
            if path.is_dir() {
                subdirs.push(path);
                continue;
            }
            let ext = path
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| e.to_ascii_lowercase())
                .unwrap_or_default();
            if ext == "shp" {
                if path.with_extension("dbf").is_file() {
                    sources.push(Source::Shapefile(path));
                } else {
                    warn!("skipping {}: no .dbf file next to it", path.display());
                }
            } else if !SHAPEFILE_COMPANIONS.contains(&ext.as_str()) {
                sources.push(Source::Definitions(path));
            }
        }
        // popped in reverse, so subdirectories are visited in sorted order
        queue.extend(subdirs.into_iter().rev());
    }
    sources.sort_by(|a, b| a.path().cmp(b.path()));
    Ok(sources)
}

fn load(source: &Source, configs: &Configs) -> crate::Result<Loaded> {
    match source {
        Source::Shapefile(path) => {
            let shapefile = Shapefile::read(path, &configs.name_field)?;
            Ok(Loaded {
                shapes: shapefile
                    .records
                    .into_iter()
                    .map(|r| (r.attributes.name, r.shape))
                    .collect(),
                skipped_lines: 0,
            })
        }
        Source::Definitions(path) => {
            let contents = fs::read_to_string(path)?;
            Ok(parse_definitions(&contents, path, configs))
        }
    }
}

fn parse_definitions(contents: &str, path: &Path, configs: &Configs) -> Loaded {
    let mut parser = WktParser::new();
    let mut loaded = Loaded::default();
    for (i, line) in contents.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let (name, wkt) = match configs.line_delimiter.split(line) {
            Some(parts) => parts,
            None => {
                warn!("{}:{}: no delimiter in line '{}'", path.display(), i + 1, line);
                loaded.skipped_lines += 1;
                continue;
            }
        };
        match parser.parse(wkt) {
            Ok(shape) => loaded.shapes.push((name.to_string(), shape)),
            Err(e) => {
                warn!("{}:{}: could not parse shape '{}': {}", path.display(), i + 1, name, e);
                loaded.skipped_lines += 1;
            }
        }
    }
    loaded
}

#[cfg(test)]
mod test {
    use super::parse_definitions;
    use crate::configs::{Configs, LineDelimiter};
    use crate::structures::Shape;
    use std::path::Path;

    #[test]
    fn test_parse_definitions() {
        let contents = "New Zealand: ENVELOPE (-176.848755 -34.414718, 178.841063 -52.578055)\n\
                        \n\
                        broken: POINT (1\n\
                        no delimiter\n\
                        spot: POINT (1 2)\n";
        let loaded = parse_definitions(contents, Path::new("shapes.txt"), &Configs::new());
        assert_eq!(loaded.shapes.len(), 2);
        assert_eq!(loaded.skipped_lines, 2);
        assert_eq!(loaded.shapes[0].0, "New Zealand");
        match &loaded.shapes[0].1 {
            Shape::Rectangle(r) => {
                assert_eq!(r.min_x, -176.848755);
                assert_eq!(r.max_y, -34.414718);
            }
            other => panic!("expected a rectangle, got {:?}", other),
        }
    }

    #[test]
    fn test_whitespace_delimiter() {
        let mut configs = Configs::new();
        configs.line_delimiter = LineDelimiter::Whitespace;
        let loaded = parse_definitions("spot POINT (1 2)\n", Path::new("a"), &configs);
        assert_eq!(loaded.shapes.len(), 1);
        assert_eq!(loaded.shapes[0].0, "spot");
    }
}

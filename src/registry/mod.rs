/*
This code is part of the shape_ingest geospatial library.
Created: 19/10/2026
Last Modified: 19/10/2026
License: MIT

Notes: A concurrent store of named shapes. Shapes can be preloaded from a
directory tree holding WKT definition files (one `name:WKT` per line) and
shapefile pairs.
*/
mod preload;

pub use self::preload::PreloadSummary;

use crate::configs::Configs;
use crate::structures::Shape;
use dashmap::DashMap;
use std::path::Path;
use tracing::info;

/// Named shapes, safe to share between threads. Every operation on a single
/// name is atomic.
#[derive(Debug, Default)]
pub struct ShapeRegistry {
    shapes: DashMap<String, Shape>,
}

impl ShapeRegistry {
    pub fn new() -> ShapeRegistry {
        ShapeRegistry::default()
    }

    /// Creates a registry and preloads the configured shapes directory, if
    /// there is one and it exists.
    pub fn with_configs(configs: &Configs) -> crate::Result<ShapeRegistry> {
        let registry = ShapeRegistry::new();
        if let Some(dir) = &configs.shapes_directory {
            if dir.is_dir() {
                let summary = registry.preload(dir, configs)?;
                info!("{}", summary);
            } else {
                info!("shapes directory {} does not exist", dir.display());
            }
        }
        Ok(registry)
    }

    /// Adds a shape. With `overwrite` any existing shape of the same name is
    /// replaced; without it the call does nothing when the name is taken.
    pub fn add(&self, name: &str, shape: Shape, overwrite: bool) {
        if overwrite {
            self.shapes.insert(name.to_string(), shape);
        } else {
            self.shapes.entry(name.to_string()).or_insert(shape);
        }
    }

    /// The shape registered under a name.
    pub fn get(&self, name: &str) -> Option<Shape> {
        self.shapes.get(name).map(|entry| entry.value().clone())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.shapes.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.shapes.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    /// Loads every shape definition found under a directory, replacing
    /// shapes that are already registered.
    pub fn preload<P: AsRef<Path>>(&self, dir: P, configs: &Configs) -> crate::Result<PreloadSummary> {
        preload::preload(self, dir.as_ref(), configs)
    }
}

#[cfg(test)]
mod test {
    use super::ShapeRegistry;
    use crate::structures::{Point2D, Shape};
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_add_and_override() {
        let registry = ShapeRegistry::new();
        let a = Shape::Point(Point2D::new(1f64, 1f64));
        let b = Shape::Point(Point2D::new(2f64, 2f64));
        registry.add("x", a.clone(), false);
        registry.add("x", b.clone(), false);
        assert_eq!(registry.get("x"), Some(a));
        registry.add("x", b.clone(), true);
        assert_eq!(registry.get("x"), Some(b));
        assert_eq!(registry.get("y"), None);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_concurrent_adds_keep_one_winner() {
        let registry = Arc::new(ShapeRegistry::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || {
                    registry.add("contested", Shape::Point(Point2D::new(i as f64, 0f64)), false);
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(registry.len(), 1);
        assert!(registry.get("contested").is_some());
    }
}

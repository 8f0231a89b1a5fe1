/*
This code is part of the shape_ingest geospatial library.
Created: 19/10/2026
Last Modified: 19/10/2026
License: MIT
*/
use super::{Point2D, Rectangle, Shape};
use crate::geometry::{normalize, GeometryError, RawGeometry, RawPolygon};

/// A closed sequence of coordinates. The first and last coordinates are
/// identical and there are at least four of them.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearRing {
    points: Vec<Point2D>,
}

impl LinearRing {
    pub fn new(points: Vec<Point2D>) -> Result<LinearRing, GeometryError> {
        if points.len() < 4 {
            return Err(GeometryError::RingTooShort { len: points.len() });
        }
        if points[0] != points[points.len() - 1] {
            return Err(GeometryError::RingNotClosed {
                first: points[0],
                last: points[points.len() - 1],
            });
        }
        Ok(LinearRing { points })
    }

    pub fn points(&self) -> &[Point2D] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn bounding_box(&self) -> Rectangle {
        Rectangle::from_points(&self.points)
    }

    /// Returns a copy shifted along the x axis.
    pub fn translate_x(&self, delta_x: f64) -> LinearRing {
        LinearRing {
            points: self.points.iter().map(|p| p.translate(delta_x, 0f64)).collect(),
        }
    }
}

/// A shell ring with zero or more holes.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    shell: LinearRing,
    holes: Vec<LinearRing>,
    bbox: Rectangle,
}

impl Polygon {
    pub fn new(shell: LinearRing, holes: Vec<LinearRing>) -> Polygon {
        let bbox = shell.bounding_box();
        Polygon { shell, holes, bbox }
    }

    /// Replaces the bounding box, e.g. with one that wraps the antimeridian.
    pub fn with_bounding_box(mut self, bbox: Rectangle) -> Polygon {
        self.bbox = bbox;
        self
    }

    pub fn shell(&self) -> &LinearRing {
        &self.shell
    }

    pub fn holes(&self) -> &[LinearRing] {
        &self.holes
    }

    pub fn bounding_box(&self) -> Rectangle {
        self.bbox
    }

    /// All coordinates, shell first, then each hole.
    pub fn coordinates(&self) -> impl Iterator<Item = &Point2D> {
        self.shell
            .points()
            .iter()
            .chain(self.holes.iter().flat_map(|h| h.points().iter()))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MultiPolygon {
    polygons: Vec<Polygon>,
    bbox: Rectangle,
}

impl MultiPolygon {
    pub fn new(polygons: Vec<Polygon>) -> MultiPolygon {
        let mut bbox: Option<Rectangle> = None;
        for p in &polygons {
            let b = p.shell().bounding_box();
            match bbox.as_mut() {
                Some(r) => r.expand_to(&b),
                None => bbox = Some(b),
            }
        }
        MultiPolygon {
            polygons,
            bbox: bbox.unwrap_or_default(),
        }
    }

    pub fn with_bounding_box(mut self, bbox: Rectangle) -> MultiPolygon {
        self.bbox = bbox;
        self
    }

    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    pub fn bounding_box(&self) -> Rectangle {
        self.bbox
    }

    pub fn coordinates(&self) -> impl Iterator<Item = &Point2D> {
        self.polygons.iter().flat_map(|p| p.coordinates())
    }
}

/// Builds a polygon point by point, the way shapes are written by hand.
///
/// ```
/// use shape_ingest::structures::PolygonBuilder;
///
/// let shape = PolygonBuilder::new()
///     .point(100.0, 0.0)
///     .point(101.0, 0.0)
///     .point(101.0, 1.0)
///     .point(100.0, 1.0)
///     .point(100.0, 0.0)
///     .build()
///     .unwrap();
/// assert!(shape.has_area());
/// ```
#[derive(Default, Clone, Debug)]
pub struct PolygonBuilder {
    points: Vec<Point2D>,
    holes: Vec<Vec<Point2D>>,
}

impl PolygonBuilder {
    pub fn new() -> PolygonBuilder {
        PolygonBuilder::default()
    }

    /// Adds a point to the shell.
    pub fn point(mut self, lon: f64, lat: f64) -> PolygonBuilder {
        self.points.push(Point2D::new(lon, lat));
        self
    }

    /// Starts a new hole; finish it with `end_hole`.
    pub fn new_hole(self) -> PolygonHoleBuilder {
        PolygonHoleBuilder {
            points: vec![],
            parent: self,
        }
    }

    /// The raw polygon, without any normalization.
    pub fn to_polygon(&self) -> Result<Polygon, GeometryError> {
        let shell = LinearRing::new(self.points.clone())?;
        let holes = self
            .holes
            .iter()
            .map(|h| LinearRing::new(h.clone()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Polygon::new(shell, holes))
    }

    /// Normalizes the polygon into a Shape.
    pub fn build(self) -> Result<Shape, GeometryError> {
        normalize(&RawGeometry::Polygon(RawPolygon {
            shell: self.points,
            holes: self.holes,
        }))
    }
}

#[derive(Clone, Debug)]
pub struct PolygonHoleBuilder {
    points: Vec<Point2D>,
    parent: PolygonBuilder,
}

impl PolygonHoleBuilder {
    pub fn point(mut self, lon: f64, lat: f64) -> PolygonHoleBuilder {
        self.points.push(Point2D::new(lon, lat));
        self
    }

    pub fn end_hole(self) -> PolygonBuilder {
        let mut parent = self.parent;
        parent.holes.push(self.points);
        parent
    }
}

/*
This code is part of the shape_ingest geospatial library.
Created: 19/10/2026
Last Modified: 19/10/2026
License: MIT

Notes: Circles are planar, with the radius in degrees. Longitude
differences are measured the short way around the antimeridian.
*/
use super::{Point2D, Rectangle, SpatialRelation};

const MULTIPLICATIVE_EPSILON: f64 = 1f64 + 1e-14;

#[derive(Default, Copy, Clone, Debug, PartialEq)]
pub struct Circle {
    pub center: Point2D, // Center
    pub radius: f64,     // Radius
}

impl Circle {
    /// Creates a new Circle,
    pub fn new(center: Point2D, radius: f64) -> Circle {
        Circle { center, radius }
    }

    pub fn distance_to(&self, p: Point2D) -> f64 {
        let mut dx = (p.x - self.center.x).abs() % 360f64;
        if dx > 180f64 {
            dx = 360f64 - dx;
        }
        let dy = p.y - self.center.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn contains(&self, p: Point2D) -> bool {
        self.distance_to(p) <= self.radius * MULTIPLICATIVE_EPSILON
    }

    pub fn relate_point(&self, p: Point2D) -> SpatialRelation {
        if self.contains(p) {
            SpatialRelation::Contains
        } else {
            SpatialRelation::Disjoint
        }
    }

    pub fn bounding_box(&self) -> Rectangle {
        Rectangle::from_unwrapped(
            self.center.x - self.radius,
            self.center.x + self.radius,
            self.center.y - self.radius,
            self.center.y + self.radius,
        )
    }
}

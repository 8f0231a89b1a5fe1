/*
This code is part of the shape_ingest geospatial library.
Created: 19/10/2026
Last Modified: 19/10/2026
License: MIT

Notes: A longitude/latitude rectangle. When min_x > max_x the rectangle
wraps across the antimeridian, e.g. (170, -170) is 20 degrees wide.
*/
use super::{Circle, Point2D, SpatialRelation};
use std::f64;

const SHIFTS: [f64; 3] = [-360f64, 0f64, 360f64];

#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub struct Rectangle {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Rectangle {
    /// Creates a rectangle exactly as given. A `min_x` greater than `max_x`
    /// denotes a rectangle that crosses the antimeridian.
    pub fn new(min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> Rectangle {
        Rectangle {
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }

    /// Creates a rectangle from its top-left and bottom-right corners.
    pub fn from_corners(top_left: Point2D, bottom_right: Point2D) -> Rectangle {
        Rectangle::new(top_left.x, bottom_right.x, bottom_right.y, top_left.y)
    }

    /// The plain (non-wrapping) extent of a set of points.
    pub fn from_points(points: &[Point2D]) -> Rectangle {
        if points.is_empty() {
            return Rectangle::default();
        }
        let mut rect = Rectangle::new(f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY, f64::NEG_INFINITY);
        for p in points {
            rect.min_x = rect.min_x.min(p.x);
            rect.max_x = rect.max_x.max(p.x);
            rect.min_y = rect.min_y.min(p.y);
            rect.max_y = rect.max_y.max(p.y);
        }
        rect
    }

    /// Builds a canonical rectangle from an unwrapped longitude range that may
    /// lie outside -180..180 or be wider than 360 degrees.
    pub fn from_unwrapped(min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> Rectangle {
        if max_x - min_x >= 360f64 {
            return Rectangle::new(-180f64, 180f64, min_y, max_y);
        }
        let mut lo = normalize_lon(min_x);
        let hi = normalize_lon(max_x);
        if lo == 180f64 && hi != 180f64 {
            lo = -180f64;
        }
        Rectangle::new(lo, hi, min_y, max_y)
    }

    pub fn crosses_dateline(&self) -> bool {
        self.min_x > self.max_x
    }

    pub fn get_width(&self) -> f64 {
        if self.crosses_dateline() {
            self.max_x - self.min_x + 360f64
        } else {
            self.max_x - self.min_x
        }
    }

    pub fn get_height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// The longitude range as a continuous interval, min_x..min_x + width.
    fn x_interval(&self) -> (f64, f64) {
        (self.min_x, self.min_x + self.get_width())
    }

    /// Plain overlap test that ignores wrapping; meant for unwrapped extents.
    pub fn overlaps(&self, other: &Rectangle) -> bool {
        !(self.max_y < other.min_y
            || self.max_x < other.min_x
            || self.min_y > other.max_y
            || self.min_x > other.max_x)
    }

    /// Grows this (non-wrapping) rectangle to cover another.
    pub fn expand_to(&mut self, other: &Rectangle) {
        self.min_x = self.min_x.min(other.min_x);
        self.max_x = self.max_x.max(other.max_x);
        self.min_y = self.min_y.min(other.min_y);
        self.max_y = self.max_y.max(other.max_y);
    }

    pub fn is_point_in_box(&self, x: f64, y: f64) -> bool {
        if y < self.min_y || y > self.max_y {
            return false;
        }
        if self.crosses_dateline() {
            x >= self.min_x || x <= self.max_x
        } else {
            x >= self.min_x && x <= self.max_x
        }
    }

    /// Corner points, clockwise from the top-left.
    pub fn corners(&self) -> [Point2D; 4] {
        [
            Point2D::new(self.min_x, self.max_y),
            Point2D::new(self.max_x, self.max_y),
            Point2D::new(self.max_x, self.min_y),
            Point2D::new(self.min_x, self.min_y),
        ]
    }

    /// Shortest planar distance from a point to this rectangle, taking the
    /// antimeridian into account. Zero when the point is inside.
    pub fn distance_to(&self, p: Point2D) -> f64 {
        let dy = if p.y < self.min_y {
            self.min_y - p.y
        } else if p.y > self.max_y {
            p.y - self.max_y
        } else {
            0f64
        };
        let (lo, hi) = self.x_interval();
        let dx = SHIFTS
            .iter()
            .map(|shift| {
                let x = p.x + shift;
                if x < lo {
                    lo - x
                } else if x > hi {
                    x - hi
                } else {
                    0f64
                }
            })
            .fold(f64::INFINITY, f64::min);
        (dx * dx + dy * dy).sqrt()
    }

    pub fn relate_point(&self, p: Point2D) -> SpatialRelation {
        if self.is_point_in_box(p.x, p.y) {
            SpatialRelation::Contains
        } else {
            SpatialRelation::Disjoint
        }
    }

    pub fn relate(&self, other: &Rectangle) -> SpatialRelation {
        let y_rel = relate_interval((self.min_y, self.max_y), (other.min_y, other.max_y));
        let x_rel = self.relate_x(other);
        if x_rel == SpatialRelation::Disjoint || y_rel == SpatialRelation::Disjoint {
            return SpatialRelation::Disjoint;
        }
        // an identical axis defers to the other axis
        if self.same_x(other) {
            return y_rel;
        }
        if self.min_y == other.min_y && self.max_y == other.max_y {
            return x_rel;
        }
        x_rel.combine(y_rel)
    }

    pub fn relate_circle(&self, circle: &Circle) -> SpatialRelation {
        match self.relate(&circle.bounding_box()) {
            SpatialRelation::Disjoint => SpatialRelation::Disjoint,
            SpatialRelation::Contains => SpatialRelation::Contains,
            _ => {
                if self.corners().iter().all(|p| circle.contains(*p)) {
                    SpatialRelation::Within
                } else if self.distance_to(circle.center) > circle.radius {
                    SpatialRelation::Disjoint
                } else {
                    SpatialRelation::Intersects
                }
            }
        }
    }

    fn same_x(&self, other: &Rectangle) -> bool {
        if self.get_width() >= 360f64 && other.get_width() >= 360f64 {
            return true;
        }
        self.min_x == other.min_x && self.max_x == other.max_x
    }

    fn relate_x(&self, other: &Rectangle) -> SpatialRelation {
        if self.get_width() >= 360f64 {
            return SpatialRelation::Contains;
        }
        if other.get_width() >= 360f64 {
            return SpatialRelation::Within;
        }
        let a = self.x_interval();
        let (b_lo, b_hi) = other.x_interval();
        let mut ret = SpatialRelation::Disjoint;
        for shift in SHIFTS.iter() {
            match relate_interval(a, (b_lo + shift, b_hi + shift)) {
                SpatialRelation::Disjoint => {}
                SpatialRelation::Intersects => ret = SpatialRelation::Intersects,
                rel => return rel,
            }
        }
        ret
    }
}

fn relate_interval(a: (f64, f64), b: (f64, f64)) -> SpatialRelation {
    if b.0 > a.1 || b.1 < a.0 {
        SpatialRelation::Disjoint
    } else if b.0 >= a.0 && b.1 <= a.1 {
        SpatialRelation::Contains
    } else if a.0 >= b.0 && a.1 <= b.1 {
        SpatialRelation::Within
    } else {
        SpatialRelation::Intersects
    }
}

/// Puts a longitude into the -180..180 range.
pub fn normalize_lon(lon: f64) -> f64 {
    if lon >= -180f64 && lon <= 180f64 {
        return lon;
    }
    let off = (lon + 180f64) % 360f64;
    if off < 0f64 {
        180f64 + off
    } else if off == 0f64 && lon > 0f64 {
        180f64
    } else {
        -180f64 + off
    }
}

#[cfg(test)]
mod test {
    use super::{normalize_lon, Rectangle};
    use crate::structures::{Circle, Point2D, SpatialRelation};

    #[test]
    fn test_normalize_lon() {
        assert_eq!(normalize_lon(181f64), -179f64);
        assert_eq!(normalize_lon(540f64), 180f64);
        assert_eq!(normalize_lon(-190f64), 170f64);
        assert_eq!(normalize_lon(45f64), 45f64);
    }

    #[test]
    fn test_from_unwrapped() {
        let r = Rectangle::from_unwrapped(179f64, 181f64, 0f64, 1f64);
        assert!(r.crosses_dateline());
        assert_eq!(r.min_x, 179f64);
        assert_eq!(r.max_x, -179f64);
        assert_eq!(r.get_width(), 2f64);

        let world = Rectangle::from_unwrapped(-100f64, 400f64, -10f64, 10f64);
        assert_eq!(world.min_x, -180f64);
        assert_eq!(world.max_x, 180f64);
    }

    #[test]
    fn test_point_in_wrapping_box() {
        let r = Rectangle::new(170f64, -170f64, -10f64, 10f64);
        assert!(r.is_point_in_box(175f64, 0f64));
        assert!(r.is_point_in_box(-175f64, 0f64));
        assert_eq!(r.is_point_in_box(0f64, 0f64), false);
    }

    #[test]
    fn test_relate() {
        let big = Rectangle::new(-45f64, 45f64, -45f64, 45f64);
        let small = Rectangle::new(-10f64, 10f64, -10f64, 10f64);
        let far = Rectangle::new(100f64, 110f64, -10f64, 10f64);
        let straddling = Rectangle::new(40f64, 50f64, 0f64, 10f64);
        assert_eq!(big.relate(&small), SpatialRelation::Contains);
        assert_eq!(small.relate(&big), SpatialRelation::Within);
        assert_eq!(big.relate(&far), SpatialRelation::Disjoint);
        assert_eq!(big.relate(&straddling), SpatialRelation::Intersects);
        assert_eq!(big.relate(&big), SpatialRelation::Contains);
    }

    #[test]
    fn test_relate_across_dateline() {
        let wrapping = Rectangle::new(170f64, -170f64, -10f64, 10f64);
        let east = Rectangle::new(-178f64, -175f64, -5f64, 5f64);
        let west = Rectangle::new(172f64, 175f64, -5f64, 5f64);
        let elsewhere = Rectangle::new(0f64, 10f64, -5f64, 5f64);
        assert_eq!(wrapping.relate(&east), SpatialRelation::Contains);
        assert_eq!(wrapping.relate(&west), SpatialRelation::Contains);
        assert_eq!(east.relate(&wrapping), SpatialRelation::Within);
        assert_eq!(wrapping.relate(&elsewhere), SpatialRelation::Disjoint);
    }

    #[test]
    fn test_relate_circle() {
        let r = Rectangle::new(-10f64, 10f64, -10f64, 10f64);
        let inside = Circle::new(Point2D::new(0f64, 0f64), 2f64);
        let around = Circle::new(Point2D::new(0f64, 0f64), 50f64);
        let away = Circle::new(Point2D::new(40f64, 40f64), 5f64);
        assert_eq!(r.relate_circle(&inside), SpatialRelation::Contains);
        assert_eq!(r.relate_circle(&around), SpatialRelation::Within);
        assert_eq!(r.relate_circle(&away), SpatialRelation::Disjoint);
    }
}

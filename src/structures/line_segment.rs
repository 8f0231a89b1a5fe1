/*
This code is part of the shape_ingest geospatial library.
Created: 19/10/2026
Last Modified: 19/10/2026
License: MIT
*/
use super::{Point2D, Rectangle};

const EPSILON: f64 = 1e-12;

/// A data structure to hold line segments, defined by
/// starting and ending points.
#[derive(Default, Copy, Clone, Debug, PartialEq)]
pub struct LineSegment {
    pub p1: Point2D,
    pub p2: Point2D,
}

impl LineSegment {
    /// Creates a new LineSegment.
    pub fn new(p1: Point2D, p2: Point2D) -> LineSegment {
        LineSegment { p1, p2 }
    }

    pub fn get_bounding_box(&self) -> Rectangle {
        Rectangle::from_points(&[self.p1, self.p2])
    }

    /// Finds the point where two segments intersect. Collinear overlapping
    /// segments have no single intersection point and return None; use
    /// `overlaps_collinear` for those.
    ///
    /// Based on https://en.wikipedia.org/wiki/Line%E2%80%93line_intersection
    pub fn get_intersection(&self, other: &Self) -> Option<Point2D> {
        if !self.get_bounding_box().overlaps(&other.get_bounding_box()) {
            return None;
        }
        let denom = (self.p1.x - self.p2.x) * (other.p1.y - other.p2.y)
            - (self.p1.y - self.p2.y) * (other.p1.x - other.p2.x);
        if denom == 0f64 {
            return None;
        }
        let t = ((self.p1.x - other.p1.x) * (other.p1.y - other.p2.y)
            - (self.p1.y - other.p1.y) * (other.p1.x - other.p2.x))
            / denom;
        let u = -((self.p1.x - self.p2.x) * (self.p1.y - other.p1.y)
            - (self.p1.y - self.p2.y) * (self.p1.x - other.p1.x))
            / denom;
        if (0f64..=1f64).contains(&t) && (0f64..=1f64).contains(&u) {
            Some(Point2D::new(
                self.p1.x + t * (self.p2.x - self.p1.x),
                self.p1.y + t * (self.p2.y - self.p1.y),
            ))
        } else {
            None
        }
    }

    /// True when the segments cross at a point interior to both of them.
    pub fn crosses(&self, other: &Self) -> bool {
        match self.get_intersection(other) {
            Some(p) => !self.is_endpoint(p) && !other.is_endpoint(p),
            None => self.overlaps_collinear(other),
        }
    }

    /// True when two collinear segments share more than a single point.
    pub fn overlaps_collinear(&self, other: &Self) -> bool {
        if !self.is_point_on_line(other.p1) || !self.is_point_on_line(other.p2) {
            return false;
        }
        // project onto the dominant axis
        let use_x = (self.p2.x - self.p1.x).abs() >= (self.p2.y - self.p1.y).abs();
        let key = |p: Point2D| if use_x { p.x } else { p.y };
        let (a0, a1) = min_max(key(self.p1), key(self.p2));
        let (b0, b1) = min_max(key(other.p1), key(other.p2));
        a0.max(b0) < a1.min(b1)
    }

    /// Whether the point lies on the segment itself, not just its line.
    pub fn contains_point(&self, p: Point2D) -> bool {
        self.is_point_on_line(p)
            && p.x >= self.p1.x.min(self.p2.x) - EPSILON
            && p.x <= self.p1.x.max(self.p2.x) + EPSILON
            && p.y >= self.p1.y.min(self.p2.y) - EPSILON
            && p.y <= self.p1.y.max(self.p2.y) + EPSILON
    }

    fn is_endpoint(&self, p: Point2D) -> bool {
        p.distance_squared(&self.p1) < EPSILON * EPSILON
            || p.distance_squared(&self.p2) < EPSILON * EPSILON
    }

    /// Checks if a Point is on the infinite line passing through the segment.
    fn is_point_on_line(&self, p: Point2D) -> bool {
        let r = (self.p2 - self.p1).cross(p - self.p1);
        r.abs() < EPSILON
    }
}

fn min_max(a: f64, b: f64) -> (f64, f64) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

#[cfg(test)]
mod test {
    use super::LineSegment;
    use crate::structures::Point2D;

    #[test]
    fn test_get_intersection() {
        let a = LineSegment::new(Point2D::new(0f64, 0f64), Point2D::new(2f64, 2f64));
        let b = LineSegment::new(Point2D::new(0f64, 2f64), Point2D::new(2f64, 0f64));
        assert_eq!(a.get_intersection(&b), Some(Point2D::new(1f64, 1f64)));
        assert!(a.crosses(&b));

        let c = LineSegment::new(Point2D::new(2f64, 2f64), Point2D::new(3f64, 0f64));
        // touching at a shared endpoint is not a crossing
        assert!(a.get_intersection(&c).is_some());
        assert_eq!(a.crosses(&c), false);
    }

    #[test]
    fn test_collinear_overlap() {
        let a = LineSegment::new(Point2D::new(0f64, 0f64), Point2D::new(4f64, 0f64));
        let b = LineSegment::new(Point2D::new(2f64, 0f64), Point2D::new(6f64, 0f64));
        let c = LineSegment::new(Point2D::new(4f64, 0f64), Point2D::new(6f64, 0f64));
        assert!(a.overlaps_collinear(&b));
        assert_eq!(a.overlaps_collinear(&c), false);
        assert!(a.contains_point(Point2D::new(3f64, 0f64)));
    }
}

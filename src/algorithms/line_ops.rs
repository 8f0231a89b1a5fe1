/*
This code is part of the shape_ingest geospatial library.
Created: 19/10/2026
Last Modified: 19/10/2026
License: MIT
*/
use crate::structures::{LineSegment, Point2D, Rectangle};

/// True when no two edges of a closed ring cross or overlap. Adjacent edges
/// share a vertex and are not compared.
pub fn ring_is_simple(ring: &[Point2D]) -> bool {
    let num_edges = ring.len().saturating_sub(1);
    for a in 0..num_edges {
        let ls1 = LineSegment::new(ring[a], ring[a + 1]);
        for b in a + 1..num_edges {
            let adjacent = b == a + 1 || (a == 0 && b == num_edges - 1);
            let ls2 = LineSegment::new(ring[b], ring[b + 1]);
            if adjacent {
                if ls1.overlaps_collinear(&ls2) {
                    return false;
                }
                continue;
            }
            if ls1.crosses(&ls2) || ls1.overlaps_collinear(&ls2) {
                return false;
            }
        }
    }
    true
}

/// True when any edge of one line crosses an edge of the other.
pub fn do_lines_cross(line1: &[Point2D], line2: &[Point2D]) -> bool {
    let box1 = Rectangle::from_points(line1);
    let box2 = Rectangle::from_points(line2);
    if !box1.overlaps(&box2) {
        return false;
    }
    for a in line1.windows(2) {
        let ls1 = LineSegment::new(a[0], a[1]);
        for b in line2.windows(2) {
            if ls1.crosses(&LineSegment::new(b[0], b[1])) {
                return true;
            }
        }
    }
    false
}

#[cfg(test)]
mod test {
    use super::{do_lines_cross, ring_is_simple};
    use crate::structures::Point2D;

    #[test]
    fn test_ring_is_simple() {
        let square = vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(1.0, 0.0),
            Point2D::new(1.0, 1.0),
            Point2D::new(0.0, 1.0),
            Point2D::new(0.0, 0.0),
        ];
        assert!(ring_is_simple(&square));

        let bowtie = vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(1.0, 1.0),
            Point2D::new(1.0, 0.0),
            Point2D::new(0.0, 1.0),
            Point2D::new(0.0, 0.0),
        ];
        assert_eq!(ring_is_simple(&bowtie), false);
    }

    #[test]
    fn test_do_lines_cross() {
        let line1 = vec![Point2D::new(0.0, 0.0), Point2D::new(10.0, 10.0)];
        let line2 = vec![Point2D::new(0.0, 10.0), Point2D::new(10.0, 0.0)];
        let line3 = vec![Point2D::new(20.0, 0.0), Point2D::new(30.0, 0.0)];
        assert!(do_lines_cross(&line1, &line2));
        assert_eq!(do_lines_cross(&line1, &line3), false);
    }
}

/*
This code is part of the shape_ingest geospatial library.
Created: 19/10/2026
Last Modified: 19/10/2026
License: MIT
*/
use crate::structures::{LineSegment, Point2D};

/// Tests if a point is Left|On|Right of an infinite line,
/// based on http://geomalgorithms.com/a03-_inclusion.html.
///
/// Return: > 0 for p2 left of the line through p0 and p1
///         = 0 for p2 on the line through p0 and p1
///         < 0 for p2 right of the line through p0 and p1
fn is_left(p0: &Point2D, p1: &Point2D, p2: &Point2D) -> f64 {
    (p1.x - p0.x) * (p2.y - p0.y) - (p2.x - p0.x) * (p1.y - p0.y)
}

/// Tests whether a point is within a polygon using the winding number (wn).
/// Points on the edge of the poly are deemed outside.
pub fn point_in_poly(p: &Point2D, poly: &[Point2D]) -> bool {
    winding_number(p, poly) != 0i32
}

/// Whether a point lies on one of the polygon's edges.
pub fn point_on_boundary(p: &Point2D, poly: &[Point2D]) -> bool {
    poly.windows(2)
        .any(|w| LineSegment::new(w[0], w[1]).contains_point(*p))
}

/// Calculates the winding number of a polygon around a point. A sequence
/// that is not explicitly closed is treated as if its last vertex joined
/// the first.
pub fn winding_number(p: &Point2D, poly: &[Point2D]) -> i32 {
    if poly.len() < 3 {
        return 0i32;
    }
    let closing = [poly[poly.len() - 1], poly[0]];
    let edges = poly.windows(2).chain(
        if poly[0] != poly[poly.len() - 1] {
            Some(&closing[..])
        } else {
            None
        }
        .into_iter(),
    );
    let mut wn = 0i32;
    for e in edges {
        if e[0].y <= p.y {
            if e[1].y > p.y && is_left(&e[0], &e[1], p) > 0f64 {
                // an upward crossing with p left of edge
                wn += 1i32;
            }
        } else if e[1].y <= p.y && is_left(&e[0], &e[1], p) < 0f64 {
            // a downward crossing with p right of edge
            wn -= 1i32;
        }
    }
    wn
}

/// Tests whether one polygon is contained within another. Vertices may
/// touch the containing boundary but at least one must be strictly inside.
/// For disjoint polys the function returns from the first tested vertex.
pub fn poly_in_poly(contained_poly: &[Point2D], containing_poly: &[Point2D]) -> bool {
    let mut interior = false;
    for p in contained_poly {
        if point_in_poly(p, containing_poly) {
            interior = true;
        } else if !point_on_boundary(p, containing_poly) {
            return false;
        }
    }
    interior
}

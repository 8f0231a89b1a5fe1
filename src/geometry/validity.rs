/*
This code is part of the shape_ingest geospatial library.
Created: 19/10/2026
Last Modified: 19/10/2026
License: MIT
*/
use super::GeometryError;
use crate::algorithms::{do_lines_cross, poly_in_poly, ring_is_simple};
use crate::structures::Polygon;

/// Checks that every ring is simple, that holes lie inside their shell
/// without crossing it or each other, and that member shells don't cross.
pub(crate) fn check(polygons: &[Polygon]) -> Result<(), GeometryError> {
    for (i, poly) in polygons.iter().enumerate() {
        let shell = poly.shell().points();
        if !ring_is_simple(shell) {
            return Err(invalid(format!(
                "self-intersection in the shell of polygon {} starting at {}",
                i, shell[0]
            )));
        }
        for (j, hole) in poly.holes().iter().enumerate() {
            let h = hole.points();
            if !ring_is_simple(h) {
                return Err(invalid(format!(
                    "self-intersection in hole {} of polygon {}",
                    j, i
                )));
            }
            if do_lines_cross(h, shell) {
                return Err(invalid(format!("hole {} crosses the shell of polygon {}", j, i)));
            }
            if !poly_in_poly(h, shell) {
                return Err(invalid(format!(
                    "hole {} lies outside the shell of polygon {}",
                    j, i
                )));
            }
            for (k, other) in poly.holes()[j + 1..].iter().enumerate() {
                let o = other.points();
                if do_lines_cross(h, o) || poly_in_poly(h, o) || poly_in_poly(o, h) {
                    return Err(invalid(format!(
                        "holes {} and {} of polygon {} overlap",
                        j,
                        j + 1 + k,
                        i
                    )));
                }
            }
        }
        for (k, other) in polygons[i + 1..].iter().enumerate() {
            if do_lines_cross(shell, other.shell().points()) {
                return Err(invalid(format!(
                    "polygons {} and {} overlap",
                    i,
                    i + 1 + k
                )));
            }
        }
    }
    Ok(())
}

fn invalid(msg: String) -> GeometryError {
    GeometryError::InvalidGeometry(msg)
}

#[cfg(test)]
mod test {
    use super::check;
    use crate::geometry::GeometryError;
    use crate::structures::{LinearRing, Point2D, Polygon};

    fn square(x: f64, y: f64, size: f64) -> LinearRing {
        LinearRing::new(vec![
            Point2D::new(x, y),
            Point2D::new(x + size, y),
            Point2D::new(x + size, y + size),
            Point2D::new(x, y + size),
            Point2D::new(x, y),
        ])
        .unwrap()
    }

    #[test]
    fn test_valid_polygon_with_holes() {
        let poly = Polygon::new(
            square(0f64, 0f64, 10f64),
            vec![square(1f64, 1f64, 2f64), square(5f64, 5f64, 2f64)],
        );
        assert!(check(&[poly]).is_ok());
    }

    #[test]
    fn test_hole_crossing_shell() {
        let poly = Polygon::new(square(0f64, 0f64, 10f64), vec![square(8f64, 8f64, 4f64)]);
        assert!(matches!(check(&[poly]), Err(GeometryError::InvalidGeometry(_))));
    }

    #[test]
    fn test_overlapping_holes() {
        let poly = Polygon::new(
            square(0f64, 0f64, 10f64),
            vec![square(1f64, 1f64, 4f64), square(2f64, 2f64, 1f64)],
        );
        assert!(matches!(check(&[poly]), Err(GeometryError::InvalidGeometry(_))));
    }

    #[test]
    fn test_crossing_members() {
        let a = Polygon::new(square(0f64, 0f64, 4f64), vec![]);
        let b = Polygon::new(square(2f64, 2f64, 4f64), vec![]);
        assert!(matches!(check(&[a, b]), Err(GeometryError::InvalidGeometry(_))));
    }
}

/*
This code is part of the shape_ingest geospatial library.
Created: 19/10/2026
Last Modified: 19/10/2026
License: MIT
*/
use crate::structures::{LinearRing, Polygon, Shape};

/// Writes a shape in the same dialect that `parse` reads.
pub fn to_wkt(shape: &Shape) -> String {
    match shape {
        Shape::Point(p) => format!("POINT ({} {})", p.x, p.y),
        Shape::Rectangle(r) => format!(
            "ENVELOPE ({} {}, {} {})",
            r.min_x, r.max_y, r.max_x, r.min_y
        ),
        Shape::Polygon(p) => format!("POLYGON {}", polygon_text(p)),
        Shape::MultiPolygon(mp) => {
            if mp.is_empty() {
                return "MULTIPOLYGON EMPTY".to_string();
            }
            let polygons: Vec<String> = mp.polygons().iter().map(polygon_text).collect();
            format!("MULTIPOLYGON ({})", polygons.join(", "))
        }
    }
}

fn polygon_text(poly: &Polygon) -> String {
    let rings: Vec<String> = std::iter::once(poly.shell())
        .chain(poly.holes().iter())
        .map(ring_text)
        .collect();
    format!("({})", rings.join(", "))
}

fn ring_text(ring: &LinearRing) -> String {
    let coords: Vec<String> = ring
        .points()
        .iter()
        .map(|p| format!("{} {}", p.x, p.y))
        .collect();
    format!("({})", coords.join(", "))
}

#[cfg(test)]
mod test {
    use super::to_wkt;
    use crate::structures::{Point2D, Rectangle, Shape};
    use crate::wkt::parse;

    #[test]
    fn test_write_point_and_envelope() {
        assert_eq!(to_wkt(&Shape::Point(Point2D::new(100f64, 90f64))), "POINT (100 90)");
        let r = Shape::Rectangle(Rectangle::new(-45f64, 45f64, -30f64, 30f64));
        assert_eq!(to_wkt(&r), "ENVELOPE (-45 30, 45 -30)");
    }

    #[test]
    fn test_round_trip() {
        let inputs = [
            "POINT (-71.064544 42.28787)",
            "ENVELOPE (-45 45, 45 -45)",
            "POLYGON ((100 0, 101 0, 101 1, 100 1, 100 0), (100.2 0.2, 100.8 0.2, 100.8 0.8, 100.2 0.8, 100.2 0.2))",
            "MULTIPOLYGON (((102 2, 103 2, 103 3, 102 3, 102 2)), ((100 0, 101 0, 101 1, 100 1, 100 0)))",
        ];
        for text in inputs.iter() {
            let shape = parse(text).unwrap();
            assert_eq!(&to_wkt(&shape), text);
            assert_eq!(parse(&to_wkt(&shape)).unwrap(), shape);
        }
    }

    #[test]
    fn test_round_trip_across_dateline() {
        let inputs = [
            "POLYGON ((170 -10, -170 -10, -170 10, 170 10, 170 -10))",
            "MULTIPOLYGON (((175 0, -178 0, -178 5, 175 5, 175 0)), ((-160 20, -150 20, -150 30, -160 30, -160 20)))",
            "ENVELOPE (170 10, -170 -10)",
        ];
        for text in inputs.iter() {
            let shape = parse(text).unwrap();
            let again = parse(&to_wkt(&shape)).unwrap();
            assert_eq!(again, shape);
            assert_eq!(again.bounding_box(), shape.bounding_box());
        }
        let bbox = parse(inputs[0]).unwrap().bounding_box();
        assert_eq!((bbox.min_x, bbox.max_x), (170f64, -170f64));
    }
}

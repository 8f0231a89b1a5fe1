/*
This code is part of the shape_ingest geospatial library.
Created: 19/10/2026
Last Modified: 19/10/2026
License: MIT
*/
use super::GeometryError;
use crate::structures::{LinearRing, Point2D, Polygon, Rectangle, Shape};
use geo::BooleanOps;

pub(crate) type GeoMultiPolygon = geo::MultiPolygon<f64>;

fn ring_to_geo(ring: &LinearRing) -> geo::LineString<f64> {
    geo::LineString::new(
        ring.points()
            .iter()
            .map(|p| geo::Coord { x: p.x, y: p.y })
            .collect(),
    )
}

fn ring_from_geo(ls: &geo::LineString<f64>) -> Result<LinearRing, GeometryError> {
    LinearRing::new(ls.coords().map(|c| Point2D::new(c.x, c.y)).collect())
}

pub(crate) fn polygon_to_geo(poly: &Polygon) -> geo::Polygon<f64> {
    geo::Polygon::new(
        ring_to_geo(poly.shell()),
        poly.holes().iter().map(ring_to_geo).collect(),
    )
}

pub(crate) fn polygons_to_geo(polys: &[Polygon]) -> GeoMultiPolygon {
    geo::MultiPolygon::new(polys.iter().map(polygon_to_geo).collect())
}

/// A rectangle as polygons in the standard range; one that wraps the
/// dateline becomes two.
pub(crate) fn rectangle_to_geo(rect: &Rectangle) -> GeoMultiPolygon {
    let make = |min_x: f64, max_x: f64| {
        geo::Rect::new(
            geo::Coord { x: min_x, y: rect.min_y },
            geo::Coord { x: max_x, y: rect.max_y },
        )
        .to_polygon()
    };
    if rect.crosses_dateline() {
        geo::MultiPolygon::new(vec![make(rect.min_x, 180f64), make(-180f64, rect.max_x)])
    } else {
        geo::MultiPolygon::new(vec![make(rect.min_x, rect.max_x)])
    }
}

/// The polygonal content of a shape; points have none.
pub(crate) fn shape_to_geo(shape: &Shape) -> GeoMultiPolygon {
    match shape {
        Shape::Point(_) => geo::MultiPolygon::new(vec![]),
        Shape::Rectangle(r) => rectangle_to_geo(r),
        Shape::Polygon(p) => geo::MultiPolygon::new(vec![polygon_to_geo(p)]),
        Shape::MultiPolygon(mp) => polygons_to_geo(mp.polygons()),
    }
}

/// Converts overlay output back, dropping pieces that collapsed to nothing.
pub(crate) fn polygons_from_geo(mp: &GeoMultiPolygon) -> Result<Vec<Polygon>, GeometryError> {
    let mut ret = Vec::with_capacity(mp.0.len());
    for poly in mp.iter() {
        if poly.exterior().0.len() < 4 {
            continue;
        }
        let shell = ring_from_geo(poly.exterior())?;
        let holes = poly
            .interiors()
            .iter()
            .filter(|ls| ls.0.len() >= 4)
            .map(ring_from_geo)
            .collect::<Result<Vec<_>, _>>()?;
        ret.push(Polygon::new(shell, holes));
    }
    Ok(ret)
}

/// Unions a sequence of polygons into one multipolygon.
pub(crate) fn union_all<I>(polys: I) -> GeoMultiPolygon
where
    I: IntoIterator<Item = geo::Polygon<f64>>,
{
    polys
        .into_iter()
        .fold(geo::MultiPolygon::new(vec![]), |acc, p| {
            acc.union(&geo::MultiPolygon::new(vec![p]))
        })
}

#[cfg(test)]
mod test {
    use super::{rectangle_to_geo, union_all};
    use crate::structures::Rectangle;
    use geo::Area;

    #[test]
    fn test_wrapping_rectangle_splits() {
        let r = Rectangle::new(170f64, -170f64, -10f64, 10f64);
        let mp = rectangle_to_geo(&r);
        assert_eq!(mp.0.len(), 2);
        assert!((mp.unsigned_area() - 400f64).abs() < 1e-9);
    }

    #[test]
    fn test_union_all() {
        let a = rectangle_to_geo(&Rectangle::new(0f64, 2f64, 0f64, 2f64));
        let b = rectangle_to_geo(&Rectangle::new(1f64, 3f64, 0f64, 2f64));
        let u = union_all(a.0.into_iter().chain(b.0));
        assert_eq!(u.0.len(), 1);
        assert!((u.unsigned_area() - 6f64).abs() < 1e-9);
    }
}

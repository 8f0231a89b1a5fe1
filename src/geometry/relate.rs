/*
This code is part of the shape_ingest geospatial library.
Created: 19/10/2026
Last Modified: 19/10/2026
License: MIT
*/
use super::convert::{rectangle_to_geo, shape_to_geo};
use crate::structures::{Circle, Point2D, Rectangle, Shape, SpatialRelation};
use geo::algorithm::relate::IntersectionMatrix;
use geo::{Intersects, Relate};

/// Maps a DE-9IM matrix onto the coarse relation. Containment is checked
/// first, then within, then disjoint; anything else intersects.
pub fn matrix_to_relation(matrix: &IntersectionMatrix) -> SpatialRelation {
    if matrix.is_contains() {
        SpatialRelation::Contains
    } else if matrix.is_within() {
        SpatialRelation::Within
    } else if matrix.is_disjoint() {
        SpatialRelation::Disjoint
    } else {
        SpatialRelation::Intersects
    }
}

/// A polygonal shape against a point: the shape either contains the point
/// or is disjoint from it.
pub(crate) fn relate_point(shape: &Shape, p: Point2D) -> SpatialRelation {
    if !shape.bounding_box().is_point_in_box(p.x, p.y) {
        return SpatialRelation::Disjoint;
    }
    if shape_to_geo(shape).intersects(&geo::Point::new(p.x, p.y)) {
        SpatialRelation::Contains
    } else {
        SpatialRelation::Disjoint
    }
}

pub(crate) fn relate_rectangle(shape: &Shape, rect: &Rectangle) -> SpatialRelation {
    let bbox_rel = shape.bounding_box().relate(rect);
    if bbox_rel == SpatialRelation::Within || bbox_rel == SpatialRelation::Disjoint {
        return bbox_rel;
    }
    matrix_to_relation(&shape_to_geo(shape).relate(&rectangle_to_geo(rect)))
}

/// Tests every coordinate against the circle. Coordinates split between
/// inside and outside mean the shapes intersect.
pub(crate) fn relate_circle(shape: &Shape, circle: &Circle) -> SpatialRelation {
    let bbox_rel = shape.bounding_box().relate_circle(circle);
    if bbox_rel == SpatialRelation::Within || bbox_rel == SpatialRelation::Disjoint {
        return bbox_rel;
    }
    let mut outside = 0usize;
    let mut i = 0usize;
    for p in shape.coordinates() {
        i += 1;
        if !circle.contains(p) {
            outside += 1;
        }
        if i != outside && outside != 0 {
            return SpatialRelation::Intersects;
        }
    }
    if i == outside {
        // every coordinate is outside; the circle is either inside or apart
        return match relate_point(shape, circle.center) {
            SpatialRelation::Disjoint => SpatialRelation::Disjoint,
            _ => SpatialRelation::Contains,
        };
    }
    SpatialRelation::Within
}

pub(crate) fn relate_geometries(a: &Shape, b: &Shape) -> SpatialRelation {
    if a.bounding_box().relate(&b.bounding_box()) == SpatialRelation::Disjoint {
        return SpatialRelation::Disjoint;
    }
    matrix_to_relation(&shape_to_geo(a).relate(&shape_to_geo(b)))
}

#[cfg(test)]
mod test {
    use crate::structures::{Circle, Point2D, PolygonBuilder, Rectangle, Shape, SpatialRelation};

    fn square(x: f64, y: f64, size: f64) -> Shape {
        PolygonBuilder::new()
            .point(x, y)
            .point(x + size, y)
            .point(x + size, y + size)
            .point(x, y + size)
            .point(x, y)
            .build()
            .unwrap()
    }

    #[test]
    fn test_relate_point() {
        let s = square(0f64, 0f64, 10f64);
        assert_eq!(s.relate(&Shape::Point(Point2D::new(5f64, 5f64))), SpatialRelation::Contains);
        assert_eq!(s.relate(&Shape::Point(Point2D::new(15f64, 5f64))), SpatialRelation::Disjoint);
        assert_eq!(
            Shape::Point(Point2D::new(5f64, 5f64)).relate(&s),
            SpatialRelation::Within
        );
    }

    #[test]
    fn test_relate_rectangle() {
        let s = square(0f64, 0f64, 10f64);
        let inner = Shape::Rectangle(Rectangle::new(2f64, 4f64, 2f64, 4f64));
        let outer = Shape::Rectangle(Rectangle::new(-5f64, 15f64, -5f64, 15f64));
        let apart = Shape::Rectangle(Rectangle::new(20f64, 30f64, 20f64, 30f64));
        let partial = Shape::Rectangle(Rectangle::new(5f64, 15f64, 5f64, 15f64));
        assert_eq!(s.relate(&inner), SpatialRelation::Contains);
        assert_eq!(s.relate(&outer), SpatialRelation::Within);
        assert_eq!(s.relate(&apart), SpatialRelation::Disjoint);
        assert_eq!(s.relate(&partial), SpatialRelation::Intersects);
        assert_eq!(inner.relate(&s), SpatialRelation::Within);
    }

    #[test]
    fn test_relate_geometries() {
        let big = square(0f64, 0f64, 10f64);
        let small = square(2f64, 2f64, 2f64);
        let apart = square(50f64, 50f64, 2f64);
        let overlapping = square(8f64, 8f64, 4f64);
        assert_eq!(big.relate(&small), SpatialRelation::Contains);
        assert_eq!(small.relate(&big), SpatialRelation::Within);
        assert_eq!(big.relate(&apart), SpatialRelation::Disjoint);
        assert_eq!(big.relate(&overlapping), SpatialRelation::Intersects);
    }

    #[test]
    fn test_relate_circle() {
        let s = square(0f64, 0f64, 10f64);
        let inside = Circle::new(Point2D::new(5f64, 5f64), 1f64);
        let around = Circle::new(Point2D::new(5f64, 5f64), 20f64);
        let apart = Circle::new(Point2D::new(50f64, 50f64), 1f64);
        let edge = Circle::new(Point2D::new(10f64, 10f64), 2f64);
        assert_eq!(s.relate_circle(&inside), SpatialRelation::Contains);
        assert_eq!(s.relate_circle(&around), SpatialRelation::Within);
        assert_eq!(s.relate_circle(&apart), SpatialRelation::Disjoint);
        assert_eq!(s.relate_circle(&edge), SpatialRelation::Intersects);
    }

    #[test]
    fn test_relate_across_dateline() {
        let s = PolygonBuilder::new()
            .point(170f64, -10f64)
            .point(-170f64, -10f64)
            .point(-170f64, 10f64)
            .point(170f64, 10f64)
            .point(170f64, -10f64)
            .build()
            .unwrap();
        let east = Shape::Point(Point2D::new(-175f64, 0f64));
        let west = Shape::Point(Point2D::new(175f64, 0f64));
        let far = Shape::Point(Point2D::new(0f64, 0f64));
        assert_eq!(s.relate(&east), SpatialRelation::Contains);
        assert_eq!(s.relate(&west), SpatialRelation::Contains);
        assert_eq!(s.relate(&far), SpatialRelation::Disjoint);
        let query = Shape::Rectangle(Rectangle::new(172f64, -172f64, -5f64, 5f64));
        assert_eq!(s.relate(&query), SpatialRelation::Contains);
    }
}

/*
This code is part of the shape_ingest geospatial library.
Created: 19/10/2026
Last Modified: 19/10/2026
License: MIT
*/
use super::{Circle, MultiPolygon, Point2D, Polygon, Rectangle, SpatialRelation};
use crate::geometry::relate;
use crate::wkt;
use std::fmt;

/// Every kind of shape the library produces. Polygons and multipolygons
/// are always the output of the dateline normalizer.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Point(Point2D),
    Rectangle(Rectangle),
    Polygon(Polygon),
    MultiPolygon(MultiPolygon),
}

impl Shape {
    pub fn bounding_box(&self) -> Rectangle {
        match self {
            Shape::Point(p) => Rectangle::new(p.x, p.x, p.y, p.y),
            Shape::Rectangle(r) => *r,
            Shape::Polygon(p) => p.bounding_box(),
            Shape::MultiPolygon(mp) => mp.bounding_box(),
        }
    }

    pub fn has_area(&self) -> bool {
        match self {
            Shape::Point(_) => false,
            Shape::Rectangle(_) | Shape::Polygon(_) => true,
            Shape::MultiPolygon(mp) => !mp.is_empty(),
        }
    }

    /// How this shape relates to a single point.
    pub fn relate_point(&self, p: Point2D) -> SpatialRelation {
        match self {
            Shape::Point(a) => {
                if *a == p {
                    SpatialRelation::Contains
                } else {
                    SpatialRelation::Disjoint
                }
            }
            Shape::Rectangle(r) => r.relate_point(p),
            Shape::Polygon(_) | Shape::MultiPolygon(_) => relate::relate_point(self, p),
        }
    }

    /// How this shape relates to a query circle.
    pub fn relate_circle(&self, circle: &Circle) -> SpatialRelation {
        match self {
            Shape::Point(p) => circle.relate_point(*p).transpose(),
            Shape::Rectangle(r) => r.relate_circle(circle),
            Shape::Polygon(_) | Shape::MultiPolygon(_) => relate::relate_circle(self, circle),
        }
    }

    /// How this shape relates to another, read as `self <relation> other`.
    pub fn relate(&self, other: &Shape) -> SpatialRelation {
        match (self, other) {
            (_, Shape::Point(p)) => self.relate_point(*p),
            (Shape::Point(p), _) => other.relate_point(*p).transpose(),
            (Shape::Rectangle(a), Shape::Rectangle(b)) => a.relate(b),
            (Shape::Rectangle(r), Shape::Polygon(_) | Shape::MultiPolygon(_)) => {
                relate::relate_rectangle(other, r).transpose()
            }
            (Shape::Polygon(_) | Shape::MultiPolygon(_), Shape::Rectangle(r)) => {
                relate::relate_rectangle(self, r)
            }
            (
                Shape::Polygon(_) | Shape::MultiPolygon(_),
                Shape::Polygon(_) | Shape::MultiPolygon(_),
            ) => relate::relate_geometries(self, other),
        }
    }

    /// Every coordinate of the shape; a rectangle yields its corners.
    pub fn coordinates(&self) -> Vec<Point2D> {
        match self {
            Shape::Point(p) => vec![*p],
            Shape::Rectangle(r) => r.corners().to_vec(),
            Shape::Polygon(p) => p.coordinates().copied().collect(),
            Shape::MultiPolygon(mp) => mp.coordinates().copied().collect(),
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", wkt::to_wkt(self))
    }
}

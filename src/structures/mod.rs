// private sub-module defined in other files
mod circle;
mod line_segment;
mod point2d;
mod polygon;
mod rectangle;
mod shape;
mod spatial_relation;

// exports identifiers from private sub-modules in the current module namespace
pub use self::circle::Circle;
pub use self::line_segment::LineSegment;
pub use self::point2d::Point2D;
pub use self::polygon::{LinearRing, MultiPolygon, Polygon, PolygonBuilder, PolygonHoleBuilder};
pub use self::rectangle::{normalize_lon, Rectangle};
pub use self::shape::Shape;
pub use self::spatial_relation::SpatialRelation;

/*
This code is part of the shape_ingest geospatial library.
Created: 19/10/2026
Last Modified: 19/10/2026
License: MIT

Notes: Turns raw rings, as read from WKT or a shapefile, into shapes that are
safe to compare near the antimeridian. A ring that crosses the dateline is
first unwrapped so that its longitudes run continuously past +180, then the
unwrapped geometry is cut back into the standard -180..180 range.
*/
mod convert;
mod pages;
pub(crate) mod relate;
mod unwrap;
mod validity;

pub use self::relate::matrix_to_relation;
pub use self::unwrap::{unwrap_ring, UnwrappedRing};

use crate::algorithms::poly_in_poly;
use crate::structures::{LinearRing, MultiPolygon, Point2D, Polygon, Rectangle, Shape};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    #[error("a linear ring needs at least 4 points, found {len}")]
    RingTooShort { len: usize },

    #[error("linear ring is not closed: first point {first} differs from last point {last}")]
    RingNotClosed { first: Point2D, last: Point2D },

    #[error("the inner ring starting at {hole_start} doesn't appear to be within the exterior ring starting at {shell_start}")]
    HoleNotContained {
        shell_start: Point2D,
        hole_start: Point2D,
    },

    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),
}

/// A polygon exactly as it was read: a shell and holes, not yet checked.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawPolygon {
    pub shell: Vec<Point2D>,
    pub holes: Vec<Vec<Point2D>>,
}

/// Geometry as produced by the readers, before normalization.
#[derive(Clone, Debug, PartialEq)]
pub enum RawGeometry {
    Point(Point2D),
    Polygon(RawPolygon),
    MultiPolygon(Vec<RawPolygon>),
}

/// Normalizes raw geometry into a valid, antimeridian-safe Shape.
///
/// Polygons keep their kind unless cutting at the antimeridian splits them,
/// in which case a MultiPolygon is returned.
pub fn normalize(raw: &RawGeometry) -> Result<Shape, GeometryError> {
    let (members, is_multi) = match raw {
        RawGeometry::Point(p) => return Ok(Shape::Point(*p)),
        RawGeometry::Polygon(p) => (vec![unwrap_polygon(p)?], false),
        RawGeometry::MultiPolygon(ps) => (
            ps.iter()
                .map(unwrap_polygon)
                .collect::<Result<Vec<_>, _>>()?,
            true,
        ),
    };
    if members.is_empty() {
        return Ok(Shape::MultiPolygon(MultiPolygon::new(vec![])));
    }

    let members = repair_overlaps(members)?;
    let extent = plain_extent(&members);
    let mut polygons = pages::cut_into_pages(members, &extent)?;
    validity::check(&polygons)?;
    let bbox = covering_extent(&polygons);

    if polygons.len() == 1 && !is_multi {
        if let Some(poly) = polygons.pop() {
            return Ok(Shape::Polygon(poly.with_bounding_box(bbox)));
        }
    }
    Ok(Shape::MultiPolygon(
        MultiPolygon::new(polygons).with_bounding_box(bbox),
    ))
}

/// Builds the rings of one polygon and unwraps them across the dateline.
fn unwrap_polygon(raw: &RawPolygon) -> Result<Polygon, GeometryError> {
    let shell = LinearRing::new(raw.shell.clone())?;
    let holes = raw
        .holes
        .iter()
        .map(|h| LinearRing::new(h.clone()))
        .collect::<Result<Vec<_>, _>>()?;

    let unwrapped = unwrap_ring(shell.points());
    let crossings = unwrapped.crossings();
    if crossings == 0 {
        return Ok(Polygon::new(shell, holes));
    }
    let shell = LinearRing::new(unwrapped.points)?;
    debug!("shell crosses the dateline {} time(s)", crossings);

    let mut aligned = Vec::with_capacity(holes.len());
    for raw_hole in holes {
        let mut hole = LinearRing::new(unwrap_ring(raw_hole.points()).points)?;
        let mut shift_count = 0;
        while !poly_in_poly(hole.points(), shell.points()) {
            if shift_count > crossings {
                return Err(GeometryError::HoleNotContained {
                    shell_start: raw.shell[0],
                    hole_start: raw_hole.points()[0],
                });
            }
            hole = hole.translate_x(360f64);
            shift_count += 1;
        }
        aligned.push(hole);
    }
    Ok(Polygon::new(shell, aligned))
}

/// Unions the members of a collection when any of them overlap.
fn repair_overlaps(members: Vec<Polygon>) -> Result<Vec<Polygon>, GeometryError> {
    let overlapping = members.iter().enumerate().any(|(i, a)| {
        members[i + 1..]
            .iter()
            .any(|b| a.bounding_box().overlaps(&b.bounding_box()))
    });
    if !overlapping {
        return Ok(members);
    }
    debug!("unioning {} overlapping polygons", members.len());
    let unioned = convert::union_all(members.iter().map(convert::polygon_to_geo));
    convert::polygons_from_geo(&unioned)
}

/// The plain extent of the members' shells; may lie outside -180..180.
fn plain_extent(members: &[Polygon]) -> Rectangle {
    let mut extent = members[0].bounding_box();
    for p in &members[1..] {
        extent.expand_to(&p.bounding_box());
    }
    extent
}

/// The smallest longitude arc, and the latitude range, covering polygons
/// that lie in -180..180. Runs touching +180 and -180 join across the
/// dateline, in which case the result has `min_x > max_x`.
fn covering_extent(polygons: &[Polygon]) -> Rectangle {
    if polygons.is_empty() {
        return Rectangle::default();
    }
    let (mut min_y, mut max_y) = (f64::INFINITY, f64::NEG_INFINITY);
    let mut spans: Vec<(f64, f64)> = Vec::with_capacity(polygons.len());
    for p in polygons {
        let b = p.shell().bounding_box();
        min_y = min_y.min(b.min_y);
        max_y = max_y.max(b.max_y);
        spans.push((b.min_x, b.max_x));
    }
    spans.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut runs: Vec<(f64, f64)> = vec![spans[0]];
    for &(lo, hi) in &spans[1..] {
        match runs.last_mut() {
            Some(run) if lo <= run.1 => run.1 = run.1.max(hi),
            _ => runs.push((lo, hi)),
        }
    }

    // the gap that wraps past the dateline is preferred on a tie
    let first = runs[0];
    let last = runs[runs.len() - 1];
    let mut widest_gap = first.0 + 360f64 - last.1;
    let mut bbox = Rectangle::new(first.0, last.1, min_y, max_y);
    for w in runs.windows(2) {
        let gap = w[1].0 - w[0].1;
        if gap > widest_gap {
            widest_gap = gap;
            bbox = Rectangle::new(w[1].0, w[0].1, min_y, max_y);
        }
    }
    if widest_gap <= 0f64 {
        return Rectangle::new(-180f64, 180f64, min_y, max_y);
    }
    bbox
}

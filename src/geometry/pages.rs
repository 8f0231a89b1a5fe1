/*
This code is part of the shape_ingest geospatial library.
Created: 19/10/2026
Last Modified: 19/10/2026
License: MIT
*/
use super::convert::{polygons_from_geo, polygons_to_geo, union_all};
use super::GeometryError;
use crate::structures::{Polygon, Rectangle};
use geo::{BooleanOps, Translate};
use tracing::debug;

/// Cuts unwrapped polygons back into the standard -180..180 range.
///
/// Each 360 degree wide page that the extent touches is intersected with the
/// polygons, and the piece is shifted back by the page's offset. The pieces
/// are then unioned. Polygons that already lie inside the standard range are
/// returned untouched.
pub(crate) fn cut_into_pages(
    polygons: Vec<Polygon>,
    extent: &Rectangle,
) -> Result<Vec<Polygon>, GeometryError> {
    if extent.min_x >= -180f64 && extent.max_x <= 180f64 {
        return Ok(polygons);
    }
    if !extent.min_x.is_finite() || !extent.max_x.is_finite() {
        return Err(GeometryError::InvalidGeometry(format!(
            "non-finite longitude extent {}..{}",
            extent.min_x, extent.max_x
        )));
    }
    let geom = polygons_to_geo(&polygons);
    let first_page = ((extent.min_x + 180f64) / 360f64).floor() as i32;
    let mut pieces = vec![];
    let mut page = first_page;
    loop {
        let min_x = -180f64 + page as f64 * 360f64;
        if extent.max_x <= min_x {
            break;
        }
        let window = geo::Rect::new(
            geo::Coord { x: min_x, y: -90f64 },
            geo::Coord {
                x: min_x + 360f64,
                y: 90f64,
            },
        )
        .to_polygon();
        let piece = geom
            .intersection(&geo::MultiPolygon::new(vec![window]))
            .translate(page as f64 * -360f64, 0f64);
        debug!("page {} yields {} polygon(s)", page, piece.0.len());
        pieces.extend(piece.0);
        page += 1;
    }
    polygons_from_geo(&union_all(pieces))
}

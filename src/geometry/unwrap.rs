/*
This code is part of the shape_ingest geospatial library.
Created: 19/10/2026
Last Modified: 19/10/2026
License: MIT
*/
use crate::structures::{Point2D, Rectangle};

/// A ring whose longitudes have been made continuous across the dateline.
#[derive(Clone, Debug, PartialEq)]
pub struct UnwrappedRing {
    pub points: Vec<Point2D>,
    /// Lowest 360 degree page visited before re-basing; always <= 0.
    pub min_page: i32,
    /// Highest 360 degree page visited before re-basing; always >= 0.
    pub max_page: i32,
}

impl UnwrappedRing {
    /// The number of times the ring crosses the dateline.
    pub fn crossings(&self) -> i32 {
        self.max_page - self.min_page
    }
}

/// Unwraps a ring across the dateline.
///
/// Consecutive points more than 180 degrees apart are taken to cross the
/// dateline, and every later point is shifted by 360 degrees to keep the
/// longitudes continuous. The result is re-based so that no point lies on a
/// page below the starting one. Rings narrower than 180 degrees cannot cross
/// the dateline and are returned as they are.
pub fn unwrap_ring(ring: &[Point2D]) -> UnwrappedRing {
    let mut ret = UnwrappedRing {
        points: ring.to_vec(),
        min_page: 0,
        max_page: 0,
    };
    if ring.len() <= 1 || Rectangle::from_points(ring).get_width() < 180f64 {
        return ret;
    }

    let mut page = 0i32;
    let mut prev_x = ring[0].x;
    for p in ret.points.iter_mut().skip(1) {
        let mut this_x = p.x + page as f64 * 360f64;
        if prev_x - this_x > 180f64 {
            // crossed from left to right
            this_x += 360f64;
            page += 1;
            ret.max_page = ret.max_page.max(page);
        } else if this_x - prev_x > 180f64 {
            // crossed from right to left
            this_x -= 360f64;
            page -= 1;
            ret.min_page = ret.min_page.min(page);
        }
        p.x = this_x;
        prev_x = this_x;
    }

    if ret.min_page != 0 {
        let shift = ret.min_page as f64 * -360f64;
        for p in ret.points.iter_mut() {
            p.x += shift;
        }
    }
    ret
}

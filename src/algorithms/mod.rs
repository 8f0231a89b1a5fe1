/*
This code is part of the shape_ingest geospatial library.
Created: 19/10/2026
Last Modified: 19/10/2026
License: MIT
*/
// private sub-module defined in other files
mod line_ops;
mod poly_ops;

// exports identifiers from private sub-modules in the current module namespace
pub use self::line_ops::{do_lines_cross, ring_is_simple};
pub use self::poly_ops::{point_in_poly, point_on_boundary, poly_in_poly, winding_number};

/*
This code is part of the shape_ingest geospatial library.
Created: 19/10/2026
Last Modified: 19/10/2026
License: MIT
*/
use std::fmt;

/// The coarse relationship between two shapes, read as `self <relation> other`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpatialRelation {
    Disjoint,
    Contains,
    Within,
    Intersects,
}

impl SpatialRelation {
    /// The relation seen from the other shape's side.
    pub fn transpose(self) -> SpatialRelation {
        match self {
            SpatialRelation::Contains => SpatialRelation::Within,
            SpatialRelation::Within => SpatialRelation::Contains,
            other => other,
        }
    }

    pub fn intersects(self) -> bool {
        self != SpatialRelation::Disjoint
    }

    /// Combines the relations of two independent axes.
    pub(crate) fn combine(self, other: SpatialRelation) -> SpatialRelation {
        if self == other {
            return self;
        }
        if self == SpatialRelation::Disjoint || other == SpatialRelation::Disjoint {
            return SpatialRelation::Disjoint;
        }
        SpatialRelation::Intersects
    }
}

impl fmt::Display for SpatialRelation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            SpatialRelation::Disjoint => "DISJOINT",
            SpatialRelation::Contains => "CONTAINS",
            SpatialRelation::Within => "WITHIN",
            SpatialRelation::Intersects => "INTERSECTS",
        };
        write!(f, "{}", s)
    }
}

//! Sliver removal for fragmented differences.

use crate::geometry::{polygon_area, FlowGeometry};
use geo_types::MultiPolygon;

/// Area (square metres) at or below which a difference fragment is a sliver
pub const SLIVER_TOLERANCE_M2: f64 = 1.0;

/// Filtered geometry plus the number of parts dropped
#[derive(Debug, Clone, PartialEq)]
pub struct SliverReport {
    pub geometry: FlowGeometry,
    pub removed: usize,
}

/// Keep only multipolygon parts whose area is strictly greater than `tolerance`.
///
/// A single polygon passes through untouched. The result of filtering a
/// multipolygon stays a multipolygon even when one part survives.
pub fn filter_slivers(geometry: FlowGeometry, tolerance: f64) -> SliverReport {
    match geometry {
        FlowGeometry::Polygon(_) => SliverReport {
            geometry,
            removed: 0,
        },
        FlowGeometry::MultiPolygon(mp) => {
            let before = mp.0.len();
            let kept: Vec<_> = mp
                .into_iter()
                .filter(|p| polygon_area(p) > tolerance)
                .collect();
            let removed = before - kept.len();
            SliverReport {
                geometry: FlowGeometry::MultiPolygon(MultiPolygon::new(kept)),
                removed,
            }
        }
    }
}

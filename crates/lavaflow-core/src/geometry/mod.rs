//! Footprint geometry.
//!
//! [`FlowGeometry`] is the closed set of shapes a lava-flow footprint can
//! take. All geometric behaviour the diff pipeline relies on goes through its
//! methods so the underlying `geo` algorithms stay behind one surface:
//!
//! - `difference`: planar set difference, normalised back to the variant
//! - `simplify`: topology-preserving simplification
//! - `is_valid`: OGC validity
//! - `area`: canonical geodesic area in square metres
//! - `make_valid` / `buffer_zero`: the two repair transforms
//! - `components`: constituent polygons
//!
//! Serialises to and from GeoJSON geometry objects.

pub mod geojson;
pub mod repair;
pub mod sliver;

#[allow(deprecated)]
use geo::ChamberlainDuquetteArea;
use geo::algorithm::orient::{Direction, Orient};
use geo::{Area, BooleanOps, RemoveRepeatedPoints, SimplifyVwPreserve, Validation};
use geo_types::{LineString, MultiPolygon, Polygon};
use serde::{Deserialize, Serialize};

use self::geojson::GeoJsonGeometry;

/// Polygonal footprint geometry in lon/lat
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GeoJsonGeometry", into = "GeoJsonGeometry")]
pub enum FlowGeometry {
    Polygon(Polygon<f64>),
    MultiPolygon(MultiPolygon<f64>),
}

/// Canonical area of a single polygon, in square metres.
///
/// Ring area on the WGS84 equatorial sphere (Chamberlain & Duquette), the
/// same measure used for source areas, sliver tolerances and diff areas.
/// Every ring is measured unsigned, so the result does not depend on ring
/// orientation: `|exterior| - sum(|hole|)`.
pub fn polygon_area(polygon: &Polygon<f64>) -> f64 {
    let holes: f64 = polygon.interiors().iter().map(ring_area).sum();
    (ring_area(polygon.exterior()) - holes).max(0.0)
}

/// Unsigned spherical area enclosed by one ring
#[allow(deprecated)]
fn ring_area(ring: &LineString<f64>) -> f64 {
    Polygon::new(ring.clone(), vec![]).chamberlain_duquette_unsigned_area()
}

impl FlowGeometry {
    /// Build from a list of parts: one part is a polygon, anything else a
    /// multipolygon (including the empty one).
    pub fn from_parts(mut parts: Vec<Polygon<f64>>) -> Self {
        if parts.len() == 1 {
            if let Some(only) = parts.pop() {
                return FlowGeometry::Polygon(only);
            }
        }
        FlowGeometry::MultiPolygon(MultiPolygon::new(parts))
    }

    /// The empty geometry (a multipolygon with no parts)
    pub fn empty() -> Self {
        FlowGeometry::MultiPolygon(MultiPolygon::new(vec![]))
    }

    pub fn is_multi(&self) -> bool {
        matches!(self, FlowGeometry::MultiPolygon(_))
    }

    pub fn is_empty(&self) -> bool {
        self.components().iter().all(|p| p.exterior().0.is_empty())
    }

    /// Constituent polygons
    pub fn components(&self) -> &[Polygon<f64>] {
        match self {
            FlowGeometry::Polygon(p) => std::slice::from_ref(p),
            FlowGeometry::MultiPolygon(mp) => &mp.0,
        }
    }

    pub fn to_multi_polygon(&self) -> MultiPolygon<f64> {
        MultiPolygon::new(self.components().to_vec())
    }

    /// Planar set difference `self - other`
    pub fn difference(&self, other: &FlowGeometry) -> FlowGeometry {
        let result = self.to_multi_polygon().difference(&other.to_multi_polygon());
        FlowGeometry::from_parts(result.0)
    }

    /// Topology-preserving simplification.
    ///
    /// `tolerance` is a distance in coordinate units; Visvalingam-Whyatt works
    /// on triangle areas, so the threshold passed down is `tolerance²`. This
    /// is weaker than a distance-based (Douglas-Peucker) pass at the same
    /// tolerance: a vertex `tolerance` off an edge much longer than
    /// `tolerance` spans a triangle larger than `tolerance²` and is kept.
    /// Only near-duplicate vertices and micro-zigzags are removed.
    pub fn simplify(&self, tolerance: f64) -> FlowGeometry {
        let epsilon = tolerance * tolerance;
        match self {
            FlowGeometry::Polygon(p) => FlowGeometry::Polygon(p.simplify_vw_preserve(&epsilon)),
            FlowGeometry::MultiPolygon(mp) => {
                FlowGeometry::MultiPolygon(mp.simplify_vw_preserve(&epsilon))
            }
        }
    }

    pub fn is_valid(&self) -> bool {
        match self {
            FlowGeometry::Polygon(p) => p.is_valid(),
            FlowGeometry::MultiPolygon(mp) => mp.is_valid(),
        }
    }

    /// Canonical area in square metres
    pub fn area(&self) -> f64 {
        self.components().iter().map(polygon_area).sum()
    }

    /// Re-orient rings to the right-hand rule (exterior counter-clockwise,
    /// holes clockwise).
    pub fn rewind(&self) -> FlowGeometry {
        match self {
            FlowGeometry::Polygon(p) => FlowGeometry::Polygon(p.orient(Direction::Default)),
            FlowGeometry::MultiPolygon(mp) => {
                FlowGeometry::MultiPolygon(mp.orient(Direction::Default))
            }
        }
    }

    /// Rebuild every polygon from its rings.
    ///
    /// Each ring is resolved on its own by a self-union, exteriors are merged
    /// and holes subtracted. Self-intersecting rings come out as their
    /// non-crossing pieces.
    pub fn make_valid(&self) -> FlowGeometry {
        let empty = MultiPolygon::<f64>::new(vec![]);
        let resolve = |ring: &LineString<f64>| Polygon::new(ring.clone(), vec![]).union(&empty);

        let mut parts = Vec::new();
        for polygon in self.components() {
            let shell = resolve(polygon.exterior());
            let holes = polygon
                .interiors()
                .iter()
                .fold(MultiPolygon::new(vec![]), |acc, ring| acc.union(&resolve(ring)));
            parts.extend(shell.difference(&holes).0);
        }
        let merged = parts
            .iter()
            .fold(MultiPolygon::new(vec![]), |acc, p| acc.union(p));
        FlowGeometry::from_parts(merged.0)
    }

    /// Zero-distance buffer.
    ///
    /// Drops non-finite and repeated coordinates, discards rings that no
    /// longer enclose any area, then unions what is left into a single
    /// non-overlapping set of polygons.
    pub fn buffer_zero(&self) -> FlowGeometry {
        let keep_ring = |ring: &LineString<f64>| {
            ring.0.len() >= 4 && Polygon::new(ring.clone(), vec![]).unsigned_area() > 0.0
        };
        let finite = |ring: &LineString<f64>| {
            LineString::new(
                ring.coords()
                    .filter(|c| c.x.is_finite() && c.y.is_finite())
                    .copied()
                    .collect(),
            )
        };

        let cleaned: Vec<Polygon<f64>> = self
            .components()
            .iter()
            .filter_map(|polygon| {
                let exterior = finite(polygon.exterior());
                let interiors: Vec<_> = polygon.interiors().iter().map(finite).collect();
                let polygon = Polygon::new(exterior, interiors).remove_repeated_points();
                if !keep_ring(polygon.exterior()) {
                    return None;
                }
                let interiors = polygon
                    .interiors()
                    .iter()
                    .filter(|r| keep_ring(r))
                    .cloned()
                    .collect();
                Some(Polygon::new(polygon.exterior().clone(), interiors))
            })
            .collect();

        let merged = cleaned
            .iter()
            .fold(MultiPolygon::new(vec![]), |acc, p| acc.union(p));
        FlowGeometry::from_parts(merged.0)
    }
}

impl From<Polygon<f64>> for FlowGeometry {
    fn from(value: Polygon<f64>) -> Self {
        FlowGeometry::Polygon(value)
    }
}

impl From<MultiPolygon<f64>> for FlowGeometry {
    fn from(value: MultiPolygon<f64>) -> Self {
        FlowGeometry::MultiPolygon(value)
    }
}

//! GeoJSON geometry objects as they appear in catalogs and stored documents.
//!
//! Only the two areal types a footprint can take are accepted. Positions keep
//! longitude/latitude; any altitude component is dropped on the way in.

use crate::errors::FootprintError;
use crate::geometry::FlowGeometry;
use geo_types::{Coord, LineString, MultiPolygon, Polygon};
use serde::{Deserialize, Serialize};

/// A GeoJSON position (`[lon, lat]` or `[lon, lat, alt]`)
pub type Position = Vec<f64>;

/// GeoJSON geometry object restricted to polygonal types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum GeoJsonGeometry {
    Polygon(Vec<Vec<Position>>),
    MultiPolygon(Vec<Vec<Vec<Position>>>),
}

fn ring_from_positions(ring: &[Position]) -> Result<LineString<f64>, FootprintError> {
    ring.iter()
        .map(|p| match p.as_slice() {
            [x, y, ..] => Ok(Coord { x: *x, y: *y }),
            _ => Err(FootprintError::MalformedGeometry {
                reason: format!("position needs at least 2 numbers, got {}", p.len()),
            }),
        })
        .collect::<Result<Vec<_>, _>>()
        .map(LineString::new)
}

fn polygon_from_rings(rings: &[Vec<Position>]) -> Result<Polygon<f64>, FootprintError> {
    let (exterior, interiors) = rings
        .split_first()
        .ok_or_else(|| FootprintError::MalformedGeometry {
            reason: "polygon has no rings".to_string(),
        })?;
    let exterior = ring_from_positions(exterior)?;
    let interiors = interiors
        .iter()
        .map(|r| ring_from_positions(r))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Polygon::new(exterior, interiors))
}

fn ring_to_positions(ring: &LineString<f64>) -> Vec<Position> {
    ring.coords().map(|c| vec![c.x, c.y]).collect()
}

fn polygon_to_rings(polygon: &Polygon<f64>) -> Vec<Vec<Position>> {
    std::iter::once(polygon.exterior())
        .chain(polygon.interiors())
        .map(ring_to_positions)
        .collect()
}

impl TryFrom<GeoJsonGeometry> for FlowGeometry {
    type Error = FootprintError;

    fn try_from(value: GeoJsonGeometry) -> Result<Self, Self::Error> {
        match value {
            GeoJsonGeometry::Polygon(rings) => Ok(FlowGeometry::Polygon(polygon_from_rings(&rings)?)),
            GeoJsonGeometry::MultiPolygon(polygons) => {
                let polygons = polygons
                    .iter()
                    .map(|rings| polygon_from_rings(rings))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(FlowGeometry::MultiPolygon(MultiPolygon::new(polygons)))
            }
        }
    }
}

impl From<FlowGeometry> for GeoJsonGeometry {
    fn from(value: FlowGeometry) -> Self {
        match value {
            FlowGeometry::Polygon(p) => GeoJsonGeometry::Polygon(polygon_to_rings(&p)),
            FlowGeometry::MultiPolygon(mp) => {
                GeoJsonGeometry::MultiPolygon(mp.iter().map(polygon_to_rings).collect())
            }
        }
    }
}

/// Parse a GeoJSON geometry object held in a `serde_json::Value`.
///
/// Non-polygonal types come back as `UnsupportedGeometry` rather than a bare
/// serde message so callers can decide to skip them.
pub fn geometry_from_value(value: &serde_json::Value) -> Result<FlowGeometry, FootprintError> {
    let geometry_type = value
        .get("type")
        .and_then(|t| t.as_str())
        .ok_or_else(|| FootprintError::MalformedGeometry {
            reason: "geometry object has no `type`".to_string(),
        })?;
    if geometry_type != "Polygon" && geometry_type != "MultiPolygon" {
        return Err(FootprintError::UnsupportedGeometry {
            geometry_type: geometry_type.to_string(),
        });
    }
    let raw: GeoJsonGeometry = serde_json::from_value(value.clone())?;
    FlowGeometry::try_from(raw)
}

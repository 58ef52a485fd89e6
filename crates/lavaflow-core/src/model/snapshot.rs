use crate::errors::FootprintError;
use crate::geometry::FlowGeometry;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// One timestamped capture of the flow footprint
///
/// Immutable once produced by a source. `area` is computed by the source and
/// carried through unchanged; the timestamp keeps its UTC offset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub id: String,
    pub geometry: FlowGeometry,
    pub timestamp: DateTime<FixedOffset>,
    pub area: f64,
}

impl Snapshot {
    pub fn new(
        id: impl Into<String>,
        geometry: FlowGeometry,
        timestamp: DateTime<FixedOffset>,
        area: f64,
    ) -> Self {
        Self {
            id: id.into(),
            geometry,
            timestamp,
            area,
        }
    }

    /// Build a snapshot whose area is the canonical area of `geometry`
    pub fn with_computed_area(
        id: impl Into<String>,
        geometry: FlowGeometry,
        timestamp: DateTime<FixedOffset>,
    ) -> Self {
        let area = geometry.area();
        Self::new(id, geometry, timestamp, area)
    }

    /// Check the fields a source is responsible for
    ///
    /// # Errors
    ///
    /// Returns `InvalidArea` if the area is negative or not finite.
    pub fn validate(&self) -> Result<(), FootprintError> {
        if !self.area.is_finite() || self.area < 0.0 {
            return Err(FootprintError::InvalidArea {
                snapshot_id: self.id.clone(),
                area: self.area,
            });
        }
        Ok(())
    }
}

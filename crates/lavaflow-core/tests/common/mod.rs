use chrono::{DateTime, Duration, FixedOffset};
use geo_types::{polygon, LineString, MultiPolygon, Polygon};
use lavaflow_core::{DiffRecord, FlowGeometry, Snapshot};

/// Base instant for test timelines (La Palma local time)
#[allow(dead_code)]
pub fn base_time() -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339("2021-09-20T08:00:00+01:00").unwrap()
}

/// `base_time()` plus whole hours
#[allow(dead_code)]
pub fn at_hour(hours: i64) -> DateTime<FixedOffset> {
    base_time() + Duration::hours(hours)
}

/// Axis-aligned square with its lower-left corner at (x, y)
#[allow(dead_code)]
pub fn square(x: f64, y: f64, side: f64) -> Polygon<f64> {
    polygon![
        (x: x, y: y),
        (x: x + side, y: y),
        (x: x + side, y: y + side),
        (x: x, y: y + side),
        (x: x, y: y),
    ]
}

/// Self-intersecting figure-eight
#[allow(dead_code)]
pub fn bowtie() -> Polygon<f64> {
    polygon![
        (x: 0.0, y: 0.0),
        (x: 0.01, y: 0.01),
        (x: 0.01, y: 0.0),
        (x: 0.0, y: 0.01),
        (x: 0.0, y: 0.0),
    ]
}

/// Square at (x, y) with a `notch` square cut out of its lower-left corner
#[allow(dead_code)]
pub fn notched_square(x: f64, y: f64, side: f64, notch: f64) -> Polygon<f64> {
    Polygon::new(
        LineString::from(vec![
            (x + notch, y),
            (x + side, y),
            (x + side, y + side),
            (x, y + side),
            (x, y + notch),
            (x + notch, y + notch),
            (x + notch, y),
        ]),
        vec![],
    )
}

/// `outer` with `inner`'s exterior as its single hole
#[allow(dead_code)]
pub fn holed(outer: Polygon<f64>, inner: Polygon<f64>) -> Polygon<f64> {
    Polygon::new(outer.exterior().clone(), vec![inner.exterior().clone()])
}

#[allow(dead_code)]
pub fn multi(parts: Vec<Polygon<f64>>) -> FlowGeometry {
    FlowGeometry::MultiPolygon(MultiPolygon::new(parts))
}

/// Snapshot of a square footprint at `hours` past the base time
#[allow(dead_code)]
pub fn square_snapshot(id: &str, side: f64, hours: i64) -> Snapshot {
    Snapshot::with_computed_area(id, FlowGeometry::from(square(0.0, 0.0, side)), at_hour(hours))
}

/// Diff record for upload tests; geometry content is irrelevant there
#[allow(dead_code)]
pub fn record(id: &str) -> DiffRecord {
    let snapshot = square_snapshot(id, 0.01, 0);
    let geometry = snapshot.geometry.clone();
    DiffRecord::new(snapshot, None, geometry)
}

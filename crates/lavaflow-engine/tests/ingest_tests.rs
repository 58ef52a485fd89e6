#![allow(clippy::unwrap_used, clippy::expect_used)]

use chrono::{DateTime, FixedOffset};
use geo_types::polygon;
use lavaflow_core::errors::{ExError, ExErrorKind, Result};
use lavaflow_core::upload::{DocumentStore, InMemoryStore, UploadSummary};
use lavaflow_core::{FlowGeometry, Snapshot, SnapshotSource, StaticSource};
use lavaflow_engine::{preview_diffs, run_ingest, IngestOptions};
use lavaflow_store::SqliteStore;

fn ts(day: u32) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(&format!("2021-09-{:02}T12:00:00+01:00", day)).unwrap()
}

fn snapshot(id: &str, day: u32, side: f64) -> Snapshot {
    let geometry = FlowGeometry::from(polygon![
        (x: -17.9, y: 28.6),
        (x: -17.9 + side, y: 28.6),
        (x: -17.9 + side, y: 28.6 + side),
        (x: -17.9, y: 28.6 + side),
        (x: -17.9, y: 28.6),
    ]);
    Snapshot::with_computed_area(id, geometry, ts(day))
}

fn source() -> StaticSource {
    StaticSource::new(vec![
        snapshot("fp-22", 22, 0.03),
        snapshot("fp-20", 20, 0.01),
        snapshot("fp-21", 21, 0.02),
    ])
}

/// Source whose fetch always fails
struct BrokenSource;

impl SnapshotSource for BrokenSource {
    fn fetch_snapshots(&self) -> Result<Vec<Snapshot>> {
        Err(ExError::new(ExErrorKind::SourceFetch).with_message("portal unavailable"))
    }
}

#[test]
fn test_ingest_uploads_all_diffs() {
    let mut store = InMemoryStore::new();

    let report = run_ingest(&source(), &mut store, IngestOptions::default()).unwrap();

    assert_eq!(report.fetched, 3);
    assert_eq!(report.emitted, 3);
    assert!(report.dropped.is_empty());
    assert_eq!(
        report.upload,
        Some(UploadSummary {
            indexed: 3,
            skipped: 0,
            errors: 0
        })
    );
    assert_eq!(store.writes(), ["fp-20", "fp-21", "fp-22"]);
    assert_eq!(store.get("fp-21").unwrap().diff_id.as_deref(), Some("fp-20"));
}

#[test]
fn test_second_ingest_skips_everything() {
    let mut store = InMemoryStore::new();
    run_ingest(&source(), &mut store, IngestOptions::default()).unwrap();

    let report = run_ingest(&source(), &mut store, IngestOptions::default()).unwrap();

    assert_eq!(report.upload.map(|u| u.skipped), Some(3));
    assert_eq!(store.writes().len(), 3);
}

#[test]
fn test_overwrite_rewrites_stored_records() {
    let mut store = InMemoryStore::new();
    run_ingest(&source(), &mut store, IngestOptions::default()).unwrap();

    let options = IngestOptions {
        overwrite: true,
        dry_run: false,
    };
    let report = run_ingest(&source(), &mut store, options).unwrap();

    assert_eq!(report.upload.map(|u| u.indexed), Some(3));
    assert_eq!(store.writes().len(), 6);
}

#[test]
fn test_dry_run_never_touches_store() {
    let mut store = InMemoryStore::new();
    store.fail_get("fp-20", ExErrorKind::ExternalService);

    let options = IngestOptions {
        overwrite: false,
        dry_run: true,
    };
    let report = run_ingest(&source(), &mut store, options).unwrap();

    assert_eq!(report.emitted, 3);
    assert!(report.upload.is_none());
    assert!(store.writes().is_empty());
}

#[test]
fn test_failed_fetch_stops_before_diffing() {
    let mut store = InMemoryStore::new();

    let err = run_ingest(&BrokenSource, &mut store, IngestOptions::default()).unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::SourceFetch);
    assert!(err.run_id().is_some());
    assert!(store.writes().is_empty());
}

#[test]
fn test_transient_store_failure_fails_run() {
    let mut store = InMemoryStore::new();
    store.fail_get("fp-21", ExErrorKind::ExternalService);

    let err = run_ingest(&source(), &mut store, IngestOptions::default()).unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::ExternalService);
    assert_eq!(store.writes(), ["fp-20"]);
}

#[test]
fn test_ingest_into_sqlite_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = SqliteStore::open(dir.path().join("footprints.db")).unwrap();

    let report = run_ingest(&source(), &mut store, IngestOptions::default()).unwrap();

    assert_eq!(report.upload.map(|u| u.indexed), Some(3));
    assert_eq!(store.count().unwrap(), 3);
    assert_eq!(store.list_ids().unwrap(), vec!["fp-20", "fp-21", "fp-22"]);
}

#[test]
fn test_preview_returns_sorted_records() {
    let batch = preview_diffs(&source()).unwrap();

    let ids: Vec<_> = batch.records.iter().map(|r| r.id()).collect();
    assert_eq!(ids, vec!["fp-20", "fp-21", "fp-22"]);
    assert_eq!(batch.records[0].diff_geometry, batch.records[0].snapshot.geometry);
}

#[test]
fn test_report_serialises_for_cli_output() {
    let mut store = InMemoryStore::new();
    let report = run_ingest(&source(), &mut store, IngestOptions::default()).unwrap();

    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["upload"]["indexed"], 3);
    assert_eq!(value["run_id"].as_str().map(str::len), Some(36));
}

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::*;
use lavaflow_core::diff::{compute_diffs, compute_diffs_with};
use lavaflow_core::geometry::sliver::SLIVER_TOLERANCE_M2;
use lavaflow_core::logging_facility::test_capture::init_test_capture;
use lavaflow_core::{FlowGeometry, RepairPlan, Snapshot};
use lavaflow_core_types::schema::{EVENT_DROPPED, EVENT_SLIVERS_REMOVED};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn test_empty_input_yields_no_records() {
    assert!(compute_diffs(&[]).is_empty());
    let batch = compute_diffs_with(&[], &RepairPlan::default());
    assert!(batch.records.is_empty());
    assert!(batch.dropped.is_empty());
}

#[test]
fn test_earliest_snapshot_diff_is_its_own_geometry() {
    let snaps = vec![
        square_snapshot("later", 0.02, 3),
        square_snapshot("first", 0.01, 1),
    ];

    let records = compute_diffs(&snaps);

    assert_eq!(records[0].id(), "first");
    assert_eq!(records[0].diff_geometry, records[0].snapshot.geometry);
    assert_eq!(records[0].diff_id, None);
    assert_eq!(records[0].diff_timestamp, None);
    assert_eq!(records[1].diff_id.as_deref(), Some("first"));
    assert_eq!(records[1].diff_timestamp, Some(at_hour(1)));
}

#[test]
fn test_snapshot_fields_are_carried_unchanged() {
    let mut snap = square_snapshot("b", 0.02, 2);
    snap.area = 12345.0;
    let snaps = vec![square_snapshot("a", 0.01, 1), snap.clone()];

    let records = compute_diffs(&snaps);

    assert_eq!(records[1].snapshot, snap);
    assert_ne!(records[1].diff_area, records[1].snapshot.area);
}

#[test]
fn test_nested_growth_sums_to_final_area() {
    let snaps: Vec<Snapshot> = (1..=4)
        .map(|i| square_snapshot(&format!("s{}", i), 0.005 * i as f64, i))
        .collect();

    let records = compute_diffs(&snaps);
    let total: f64 = records.iter().map(|r| r.diff_area).sum();
    let last = snaps[3].area;

    assert_eq!(records.len(), 4);
    assert!((total - last).abs() / last < 1e-6, "{} vs {}", total, last);
}

#[test]
fn test_growth_around_predecessor_is_a_ring() {
    let previous = Snapshot::with_computed_area(
        "ring_prev",
        FlowGeometry::from(square(-17.895, 28.605, 0.01)),
        at_hour(1),
    );
    let current = Snapshot::with_computed_area(
        "ring_curr",
        FlowGeometry::from(square(-17.9, 28.6, 0.02)),
        at_hour(2),
    );
    let expected = current.area - previous.area;

    let records = compute_diffs(&[previous, current.clone()]);
    let diff = &records[1].diff_geometry;

    assert_eq!(diff.components().len(), 1);
    assert_eq!(diff.components()[0].interiors().len(), 1);
    assert!(records[1].diff_area < current.area);
    assert!(
        (records[1].diff_area - expected).abs() / expected < 1e-6,
        "{} vs {}",
        records[1].diff_area,
        expected
    );
}

#[test]
fn test_holed_footprint_area_excludes_hole() {
    let outer = square(-17.9, 28.6, 0.02);
    let inner = square(-17.895, 28.605, 0.01);
    let expected = FlowGeometry::from(outer.clone()).area() - FlowGeometry::from(inner.clone()).area();

    let snap = Snapshot::with_computed_area(
        "holed_first",
        FlowGeometry::from(holed(outer, inner)).rewind(),
        at_hour(1),
    );
    let records = compute_diffs(&[snap]);

    assert!((records[0].snapshot.area - expected).abs() / expected < 1e-9);
    assert!((records[0].diff_area - expected).abs() / expected < 1e-9);
}

#[test]
fn test_unchanged_footprint_emits_empty_diff() {
    let snaps = vec![
        square_snapshot("a", 0.01, 1),
        square_snapshot("b", 0.01, 2),
    ];

    let records = compute_diffs(&snaps);

    assert_eq!(records.len(), 2);
    assert!(records[1].diff_geometry.is_empty());
    assert_eq!(records[1].diff_area, 0.0);
}

#[test]
fn test_equal_timestamps_keep_input_order() {
    let snaps = vec![
        square_snapshot("b", 0.01, 5),
        square_snapshot("a", 0.02, 5),
    ];

    let records = compute_diffs(&snaps);
    let ids: Vec<_> = records.iter().map(|r| r.id()).collect();

    assert_eq!(ids, vec!["b", "a"]);
    assert_eq!(records[1].diff_id.as_deref(), Some("b"));
}

#[test]
fn test_sliver_parts_are_removed_from_fragmented_diff() {
    let capture = init_test_capture();
    // The previous footprint covers the second square except a ~0.3 m2 notch
    let previous = Snapshot::with_computed_area(
        "sliver_prev",
        FlowGeometry::from(notched_square(1.0, 1.0, 0.01, 5e-6)),
        at_hour(1),
    );
    let current = Snapshot::with_computed_area(
        "sliver_curr",
        multi(vec![square(0.0, 0.0, 0.01), square(1.0, 1.0, 0.01)]),
        at_hour(2),
    );
    let big_area = FlowGeometry::from(square(0.0, 0.0, 0.01)).area();

    let records = compute_diffs(&[previous, current]);
    let diff = &records[1].diff_geometry;

    assert!(diff.is_multi());
    assert_eq!(diff.components().len(), 1);
    assert!(diff.components().iter().all(|p| {
        FlowGeometry::from(p.clone()).area() > SLIVER_TOLERANCE_M2
    }));
    assert!((records[1].diff_area - big_area).abs() / big_area < 1e-6);

    let removed = capture.count_events(|e| {
        e.event.as_deref() == Some(EVENT_SLIVERS_REMOVED)
            && e.field("snapshot_id") == Some("sliver_curr")
            && e.field("parts_removed") == Some("1")
    });
    assert_eq!(removed, 1);
}

// No input is known that both strategies of the default plan leave invalid,
// so the drop path runs with an empty plan.
#[test]
fn test_unrepairable_snapshot_is_dropped_and_batch_continues() {
    let capture = init_test_capture();
    let broken = Snapshot::with_computed_area("drop_bowtie", FlowGeometry::from(bowtie()), at_hour(1));
    let next = Snapshot::with_computed_area(
        "drop_next",
        FlowGeometry::from(square(5.0, 5.0, 0.01)),
        at_hour(2),
    );

    let batch = compute_diffs_with(&[broken, next], &RepairPlan::none());

    assert_eq!(batch.dropped, vec!["drop_bowtie".to_string()]);
    assert_eq!(batch.records.len(), 1);
    // The dropped snapshot is still the predecessor of the next one
    assert_eq!(batch.records[0].diff_id.as_deref(), Some("drop_bowtie"));

    let dropped = capture.count_events(|e| {
        e.op.as_deref() == Some("compute_diffs")
            && e.event.as_deref() == Some(EVENT_DROPPED)
            && e.field("snapshot_id") == Some("drop_bowtie")
    });
    assert_eq!(dropped, 1);
}

#[test]
fn test_invalid_input_geometry_is_repaired_before_emit() {
    let overlapping = multi(vec![square(0.0, 0.0, 0.02), square(0.01, 0.01, 0.02)]);
    let snap = Snapshot::with_computed_area("overlap", overlapping, at_hour(1));

    let records = compute_diffs(&[snap]);

    assert_eq!(records.len(), 1);
    assert!(records[0].diff_geometry.is_valid());
    assert_eq!(records[0].diff_area, records[0].diff_geometry.area());
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

/// (index, x step, y step, side step) for a square footprint
type SquareSpec = (usize, u8, u8, u8);

fn snapshot_from(spec: &SquareSpec) -> Snapshot {
    let (i, x, y, side) = *spec;
    Snapshot::with_computed_area(
        format!("p{}", i),
        FlowGeometry::from(square(
            f64::from(x) * 0.001,
            f64::from(y) * 0.001,
            f64::from(side) * 0.001,
        )),
        at_hour(i as i64),
    )
}

fn specs_and_shuffle() -> impl Strategy<Value = (Vec<SquareSpec>, Vec<SquareSpec>)> {
    prop::collection::vec((0u8..10, 0u8..10, 1u8..20), 1..6)
        .prop_map(|v| {
            v.into_iter()
                .enumerate()
                .map(|(i, (x, y, s))| (i, x, y, s))
                .collect::<Vec<_>>()
        })
        .prop_flat_map(|v| (Just(v.clone()), Just(v).prop_shuffle()))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_input_order_does_not_matter((ordered, shuffled) in specs_and_shuffle()) {
        let a: Vec<Snapshot> = ordered.iter().map(snapshot_from).collect();
        let b: Vec<Snapshot> = shuffled.iter().map(snapshot_from).collect();

        prop_assert_eq!(compute_diffs(&a), compute_diffs(&b));
    }

    #[test]
    fn prop_emitted_records_are_valid_with_derived_area((ordered, _) in specs_and_shuffle()) {
        let snaps: Vec<Snapshot> = ordered.iter().map(snapshot_from).collect();

        let batch = compute_diffs_with(&snaps, &RepairPlan::default());

        prop_assert_eq!(batch.records.len() + batch.dropped.len(), snaps.len());
        for record in &batch.records {
            prop_assert!(record.diff_geometry.is_valid());
            prop_assert!(record.diff_area >= 0.0);
            prop_assert_eq!(record.diff_area, record.diff_geometry.area());
            if record.diff_geometry.is_multi() {
                for part in record.diff_geometry.components() {
                    prop_assert!(FlowGeometry::from(part.clone()).area() > SLIVER_TOLERANCE_M2);
                }
            }
        }
    }

    #[test]
    fn prop_records_follow_timestamp_order((_, shuffled) in specs_and_shuffle()) {
        let snaps: Vec<Snapshot> = shuffled.iter().map(snapshot_from).collect();

        let records = compute_diffs(&snaps);

        prop_assert!(records
            .windows(2)
            .all(|w| w[0].snapshot.timestamp <= w[1].snapshot.timestamp));
        prop_assert!(records[0].diff_id.is_none());
    }
}

use proptest::prelude::*;
use word_scatter::core::{MarkerSizing, PointStore, RawRecord, ScoreNormalization};

fn record_strategy() -> impl Strategy<Value = RawRecord> {
    (0.001f64..10.0, 1.0f64..100_000.0, -50.0f64..50.0)
        .prop_map(|(x, y, score)| RawRecord::new("w", x, y, score))
}

proptest! {
    #[test]
    fn batch_radii_stay_within_configured_range(
        records in prop::collection::vec(record_strategy(), 0..64)
    ) {
        let sizing = MarkerSizing::default();
        let mut store = PointStore::new(sizing).expect("store");
        let report = store.ingest(records.clone());

        prop_assert_eq!(report.accepted, records.len());
        prop_assert_eq!(store.len(), records.len());
        for point in store.points() {
            prop_assert!(point.radius >= sizing.radius_min && point.radius <= sizing.radius_max);
            prop_assert!(point.hover_radius > point.radius);
        }
    }

    #[test]
    fn running_radii_stay_within_range_across_batches(
        batches in prop::collection::vec(prop::collection::vec(record_strategy(), 1..16), 1..6)
    ) {
        let sizing = MarkerSizing {
            normalization: ScoreNormalization::Running,
            ..MarkerSizing::default()
        };
        let mut store = PointStore::new(sizing).expect("store");
        let mut expected_len = 0;
        for batch in batches {
            expected_len += batch.len();
            store.ingest(batch);
        }

        prop_assert_eq!(store.len(), expected_len);
        for point in store.points() {
            prop_assert!(point.radius >= sizing.radius_min && point.radius <= sizing.radius_max);
        }
    }

    #[test]
    fn highest_score_in_batch_gets_largest_radius(
        records in prop::collection::vec(record_strategy(), 2..32)
    ) {
        let mut store = PointStore::new(MarkerSizing::default()).expect("store");
        store.ingest(records);

        let top = store
            .points()
            .iter()
            .max_by(|lhs, rhs| lhs.score.total_cmp(&rhs.score))
            .expect("non-empty");
        let largest = store
            .points()
            .iter()
            .map(|point| point.radius)
            .fold(f64::MIN, f64::max);
        prop_assert_eq!(top.radius, largest);
    }
}

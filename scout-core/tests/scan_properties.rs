//! Property-based tests for the candidate scan.
//!
//! # Invariants tested
//!
//! - **Counting:** `nearby_count` equals a direct recount of competitors
//!   strictly inside the radius.
//! - **Idempotence:** scanning the same inputs twice yields equal output.
//! - **Monotonicity:** growing the radius never shrinks a point's count.
//! - **Strategy equivalence:** the indexed scan equals the exhaustive scan.
//! - **Classification:** `is_suggested` matches the two thresholds.


use proptest::prelude::*;
use scout_core::test_support::{params, recount_nearby};
use scout_core::{DistanceMetric, ScanStrategy, Scanner};

use proptest_support::{competitors_strategy, radius_strategy, small_grid};

fn metric_strategy() -> impl Strategy<Value = DistanceMetric> {
    prop_oneof![Just(DistanceMetric::Geodesic), Just(DistanceMetric::Haversine)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: every emitted count matches a direct recount.
    #[test]
    fn nearby_count_matches_recount(
        competitors in competitors_strategy(24),
        radius in radius_strategy(),
        metric in metric_strategy(),
    ) {
        let search = params(radius, 4.0, 2).with_metric(metric);
        let outcome = Scanner::new(search)
            .scan(&competitors, &small_grid())
            .expect("scan should succeed");

        for candidate in &outcome.candidates {
            let expected = recount_nearby(&competitors, candidate.location(), radius, metric);
            prop_assert_eq!(candidate.nearby_count, expected);
        }
    }

    /// Property: identical inputs yield identical output.
    #[test]
    fn scan_is_idempotent(
        competitors in competitors_strategy(24),
        radius in radius_strategy(),
    ) {
        let scanner = Scanner::new(params(radius, 4.0, 1));
        let first = scanner.scan(&competitors, &small_grid()).expect("first scan");
        let second = scanner.scan(&competitors, &small_grid()).expect("second scan");
        prop_assert_eq!(first, second);
    }

    /// Property: a wider radius never lowers a point's nearby count.
    #[test]
    fn wider_radius_never_lowers_counts(
        competitors in competitors_strategy(24),
        radius in radius_strategy(),
        extra in 1.0_f64..2_000.0,
    ) {
        #[expect(clippy::float_arithmetic, reason = "widen the generated radius")]
        let wider = radius + extra;
        let narrow = Scanner::new(params(radius, 1.0, 10))
            .scan(&competitors, &small_grid())
            .expect("narrow scan");
        let wide = Scanner::new(params(wider, 1.0, 10))
            .scan(&competitors, &small_grid())
            .expect("wide scan");

        for candidate in &narrow.candidates {
            let widened = wide
                .candidates
                .iter()
                .find(|other| other.location() == candidate.location());
            prop_assert!(widened.is_some(), "candidate vanished at a wider radius");
            if let Some(wider_candidate) = widened {
                prop_assert!(wider_candidate.nearby_count >= candidate.nearby_count);
            }
        }
    }

    /// Property: the indexed strategy reproduces the exhaustive scan exactly.
    #[test]
    fn indexed_scan_equals_exhaustive_scan(
        competitors in competitors_strategy(32),
        radius in radius_strategy(),
        metric in metric_strategy(),
        min_rating in 1.0_f64..5.0,
        ceiling in 0_usize..4,
    ) {
        let search = params(radius, min_rating, ceiling).with_metric(metric);
        let exhaustive = Scanner::new(search)
            .scan(&competitors, &small_grid())
            .expect("exhaustive scan");
        let indexed = Scanner::new(search)
            .with_strategy(ScanStrategy::Indexed)
            .scan(&competitors, &small_grid())
            .expect("indexed scan");
        prop_assert_eq!(exhaustive, indexed);
    }

    /// Property: classification follows both thresholds.
    #[test]
    fn suggestion_follows_thresholds(
        competitors in competitors_strategy(24),
        radius in radius_strategy(),
        min_rating in 1.0_f64..5.0,
        ceiling in 0_usize..4,
    ) {
        let search = params(radius, min_rating, ceiling);
        let outcome = Scanner::new(search)
            .scan(&competitors, &small_grid())
            .expect("scan should succeed");

        for candidate in &outcome.candidates {
            prop_assert!(candidate.nearby_count >= 1);
            prop_assert_eq!(
                candidate.is_suggested,
                candidate.nearby_count <= ceiling && candidate.avg_rating >= min_rating
            );
        }
    }
}

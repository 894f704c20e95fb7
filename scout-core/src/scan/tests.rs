//! Unit coverage for the candidate scan.

use geo::Coord;
use rstest::{fixture, rstest};

use super::*;
use crate::DistanceMetric;
use crate::test_support::{
    competitor, params, recount_nearby, unit_grid, unlocated_competitor, zurich_competitors,
    zurich_grid,
};

/// Radius that reaches every point of the unit grid from every other one.
const COVERS_UNIT_GRID: f64 = 200_000.0;

#[fixture]
fn single_rated() -> Vec<CompetitorRecord> {
    vec![competitor("Origin", 0.0, 0.0, Some(4.5))]
}

#[rstest]
fn single_competitor_suggests_every_point(single_rated: Vec<CompetitorRecord>) {
    let candidates = score_candidates(&single_rated, &unit_grid(), &params(COVERS_UNIT_GRID, 4.0, 1))
        .expect("scan succeeds");

    let coords: Vec<_> = candidates
        .iter()
        .map(|candidate| (candidate.latitude, candidate.longitude))
        .collect();
    assert_eq!(coords, vec![(0.0, 0.0), (0.0, 0.5), (0.5, 0.0), (0.5, 0.5)]);
    for candidate in &candidates {
        assert_eq!(candidate.nearby_count, 1);
        assert_eq!(candidate.avg_rating, 4.5);
        assert!(candidate.is_suggested);
    }
}

#[rstest]
fn crowded_neighbourhoods_are_never_suggested() {
    let competitors = vec![
        competitor("Origin", 0.0, 0.0, Some(5.0)),
        competitor("East", 0.0, 0.5, Some(3.0)),
    ];
    let candidates = score_candidates(&competitors, &unit_grid(), &params(COVERS_UNIT_GRID, 1.0, 1))
        .expect("scan succeeds");

    assert_eq!(candidates.len(), 4);
    for candidate in &candidates {
        assert_eq!(candidate.nearby_count, 2);
        assert_eq!(candidate.avg_rating, 4.0);
        assert!(!candidate.is_suggested);
    }
}

#[rstest]
fn low_ratings_are_emitted_but_not_suggested(single_rated: Vec<CompetitorRecord>) {
    let candidates = score_candidates(&single_rated, &unit_grid(), &params(COVERS_UNIT_GRID, 4.8, 3))
        .expect("scan succeeds");
    assert_eq!(candidates.len(), 4);
    assert!(candidates.iter().all(|candidate| !candidate.is_suggested));
}

#[rstest]
fn empty_competitor_table_yields_no_candidates() {
    let candidates =
        score_candidates(&[], &unit_grid(), &params(COVERS_UNIT_GRID, 4.0, 1)).expect("scan succeeds");
    assert!(candidates.is_empty());
}

#[rstest]
#[case(DistanceMetric::Geodesic)]
#[case(DistanceMetric::Haversine)]
fn competitor_exactly_on_the_radius_is_excluded(#[case] metric: DistanceMetric) {
    let competitors = vec![
        competitor("Centre", 0.0, 0.0, Some(4.0)),
        competitor("Edge", 0.0, 0.5, Some(2.0)),
    ];
    let boundary = metric.distance_meters(Coord { x: 0.0, y: 0.0 }, Coord { x: 0.5, y: 0.0 });
    let grid = GridSpec::new(0.0, 0.5, 0.0, 0.5, 0.5).expect("single point grid");

    let on_boundary = params(boundary, 1.0, 5).with_metric(metric);
    let candidates = score_candidates(&competitors, &grid, &on_boundary).expect("scan succeeds");
    let origin = candidates.first().expect("origin candidate");
    assert_eq!(origin.nearby_count, 1);
    assert_eq!(origin.avg_rating, 4.0);

    let widened = params(boundary.next_up(), 1.0, 5).with_metric(metric);
    let widened_candidates =
        score_candidates(&competitors, &grid, &widened).expect("scan succeeds");
    let widened_origin = widened_candidates.first().expect("origin candidate");
    assert_eq!(widened_origin.nearby_count, 2);
}

#[rstest]
fn unrated_only_neighbourhoods_are_dropped() {
    let competitors = vec![
        competitor("Unrated", 0.0, 0.0, None),
        competitor("Far", 0.5, 0.5, Some(4.0)),
    ];
    let outcome = Scanner::new(params(40_000.0, 1.0, 5))
        .scan(&competitors, &unit_grid())
        .expect("scan succeeds");

    // (0, 0) only sees the unrated shop; (0, 0.5) and (0.5, 0) see nothing.
    let coords: Vec<_> = outcome
        .candidates
        .iter()
        .map(|candidate| (candidate.latitude, candidate.longitude))
        .collect();
    assert_eq!(coords, vec![(0.5, 0.5)]);
    assert_eq!(outcome.grid_points, 4);
}

#[rstest]
fn unrated_neighbours_count_but_do_not_dilute_the_average() {
    let competitors = vec![
        competitor("Rated", 0.0, 0.0, Some(3.0)),
        competitor("Unrated", 0.0, 0.0, None),
    ];
    let grid = GridSpec::new(0.0, 0.5, 0.0, 0.5, 0.5).expect("single point grid");
    let candidates =
        score_candidates(&competitors, &grid, &params(1_000.0, 3.0, 2)).expect("scan succeeds");
    let only = candidates.first().expect("one candidate");
    assert_eq!(only.nearby_count, 2);
    assert_eq!(only.avg_rating, 3.0);
    assert!(only.is_suggested);
}

#[rstest]
fn records_without_coordinates_are_skipped() {
    let competitors = vec![
        unlocated_competitor("Lost", Some(5.0)),
        competitor("Origin", 0.0, 0.0, Some(4.0)),
    ];
    let outcome = Scanner::new(params(COVERS_UNIT_GRID, 1.0, 5))
        .scan(&competitors, &unit_grid())
        .expect("scan succeeds");
    assert_eq!(outcome.skipped_records, 1);
    assert!(outcome.candidates.iter().all(|c| c.nearby_count == 1));
}

#[rstest]
fn invalid_grid_fails_before_scanning(single_rated: Vec<CompetitorRecord>) {
    let mut grid = unit_grid();
    grid.lat_min = 2.0;
    let err = score_candidates(&single_rated, &grid, &params(1_000.0, 4.0, 1))
        .expect_err("inverted grid should fail");
    assert!(matches!(
        err,
        ScoreError::Grid(InvalidGridError::InvertedBounds { .. })
    ));
}

#[rstest]
#[case(0.0)]
#[case(-10.0)]
fn invalid_radius_fails_before_scanning(
    single_rated: Vec<CompetitorRecord>,
    #[case] radius: f64,
) {
    let err = score_candidates(&single_rated, &unit_grid(), &params(radius, 4.0, 1))
        .expect_err("non-positive radius should fail");
    assert!(matches!(
        err,
        ScoreError::Params(InvalidParamsError::NonPositiveRadius { .. })
    ));
}

#[rstest]
#[case(ScanStrategy::Exhaustive)]
#[case(ScanStrategy::Indexed)]
fn nearby_counts_match_direct_recount(#[case] strategy: ScanStrategy) {
    let competitors = zurich_competitors();
    let search = params(900.0, 4.3, 1);
    let outcome = Scanner::new(search)
        .with_strategy(strategy)
        .scan(&competitors, &zurich_grid())
        .expect("scan succeeds");

    assert_eq!(outcome.grid_points, 256);
    assert_eq!(outcome.skipped_records, 1);
    assert!(!outcome.candidates.is_empty());
    for candidate in &outcome.candidates {
        let expected = recount_nearby(
            &competitors,
            candidate.location(),
            search.radius_meters,
            search.metric,
        );
        assert_eq!(candidate.nearby_count, expected);
    }
}

#[rstest]
fn indexed_scan_matches_exhaustive_scan() {
    let competitors = zurich_competitors();
    let search = params(750.0, 4.0, 1).with_metric(DistanceMetric::Haversine);
    let exhaustive = Scanner::new(search)
        .scan(&competitors, &zurich_grid())
        .expect("exhaustive scan");
    let indexed = Scanner::new(search)
        .with_strategy(ScanStrategy::Indexed)
        .scan(&competitors, &zurich_grid())
        .expect("indexed scan");
    assert_eq!(exhaustive, indexed);
}

#[rstest]
fn suggested_helpers_filter_candidates() {
    let competitors = vec![
        competitor("Origin", 0.0, 0.0, Some(5.0)),
        competitor("North", 0.5, 0.0, Some(2.0)),
    ];
    let outcome = Scanner::new(params(40_000.0, 4.0, 1))
        .scan(&competitors, &unit_grid())
        .expect("scan succeeds");

    let suggested: Vec<_> = outcome
        .suggested()
        .map(|candidate| (candidate.latitude, candidate.longitude))
        .collect();
    assert_eq!(suggested, vec![(0.0, 0.0)]);
    assert_eq!(outcome.suggested_count(), 1);
    assert_eq!(outcome.candidates.len(), 2);
}

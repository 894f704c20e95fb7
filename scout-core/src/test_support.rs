//! Fixtures shared by unit, behaviour and property tests.
//!
//! Builders here skip validation so tests can also describe dirty data.

use geo::Coord;

use crate::{CompetitorRecord, DistanceMetric, GridSpec, SearchParams};

/// Competitor at (`lat`, `lon`) with an optional rating.
#[must_use]
pub fn competitor(name: &str, lat: f64, lon: f64, rating: Option<f64>) -> CompetitorRecord {
    CompetitorRecord {
        name: name.to_owned(),
        location: Some(Coord { x: lon, y: lat }),
        rating,
    }
}

/// Competitor whose coordinates are missing.
#[must_use]
pub fn unlocated_competitor(name: &str, rating: Option<f64>) -> CompetitorRecord {
    CompetitorRecord {
        name: name.to_owned(),
        location: None,
        rating,
    }
}

/// The `[0, 1) x [0, 1)` grid with a step of `0.5`: four points.
#[must_use]
pub const fn unit_grid() -> GridSpec {
    GridSpec {
        lat_min: 0.0,
        lat_max: 1.0,
        lon_min: 0.0,
        lon_max: 1.0,
        step: 0.5,
    }
}

/// The central Zurich grid: 16 x 16 points, 0.005 degrees apart.
#[must_use]
pub const fn zurich_grid() -> GridSpec {
    GridSpec {
        lat_min: 47.34,
        lat_max: 47.42,
        lon_min: 8.49,
        lon_max: 8.57,
        step: 0.005,
    }
}

/// Search parameters using the default geodesic metric.
#[must_use]
pub const fn params(
    radius_meters: f64,
    min_avg_rating: f64,
    max_nearby_competitors: usize,
) -> SearchParams {
    SearchParams {
        radius_meters,
        min_avg_rating,
        max_nearby_competitors,
        metric: DistanceMetric::Geodesic,
    }
}

/// A small set of storefronts around central Zurich, including one unrated
/// shop and one row with missing coordinates.
#[must_use]
pub fn zurich_competitors() -> Vec<CompetitorRecord> {
    vec![
        competitor("Hauptbahnhof Juice", 47.3779, 8.5403, Some(4.6)),
        competitor("Bellevue Blends", 47.3667, 8.5450, Some(4.1)),
        competitor("Oerlikon Smoothies", 47.4111, 8.5442, Some(3.8)),
        competitor("Wiedikon Press", 47.3705, 8.5230, None),
        competitor("Enge Greens", 47.3640, 8.5310, Some(4.9)),
        competitor("Seefeld Squeeze", 47.3560, 8.5560, Some(4.4)),
        unlocated_competitor("Pop-up Cart", Some(5.0)),
    ]
}

/// Count competitors strictly within `radius_meters` of `point` by direct
/// recomputation; the oracle for scan invariants.
#[must_use]
pub fn recount_nearby(
    competitors: &[CompetitorRecord],
    point: Coord<f64>,
    radius_meters: f64,
    metric: DistanceMetric,
) -> usize {
    competitors
        .iter()
        .filter_map(CompetitorRecord::usable_location)
        .filter(|location| metric.distance_meters(point, *location) < radius_meters)
        .count()
}

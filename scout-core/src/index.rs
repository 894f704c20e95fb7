//! R\*-tree prefilter used by [`ScanStrategy::Indexed`](crate::ScanStrategy).
//!
//! The index only narrows the set of competitors handed to the exact
//! distance test. Envelopes are padded so that every competitor within the
//! radius under either metric is returned.

use std::f64::consts::FRAC_PI_2;

use geo::Coord;
use rstar::{AABB, RTree, RTreeObject};

/// Metres per degree of latitude, rounded down below the WGS84 minimum.
const METERS_PER_DEGREE_FLOOR: f64 = 110_000.0;

/// Sphere radius no larger than any WGS84 radius of curvature.
const EARTH_RADIUS_FLOOR_M: f64 = 6_300_000.0;

/// Relative padding applied to both envelope axes.
const ENVELOPE_MARGIN: f64 = 1.05;

/// Competitor position stored in the R\*-tree.
#[derive(Debug, Clone, Copy, PartialEq)]
struct IndexedCompetitor {
    position: usize,
    location: [f64; 2],
}

impl RTreeObject for IndexedCompetitor {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.location)
    }
}

/// Spatial index over located competitors, keyed by their scan position.
#[derive(Debug)]
pub(crate) struct CompetitorIndex {
    tree: RTree<IndexedCompetitor>,
}

impl CompetitorIndex {
    /// Bulk-load the index; position `i` refers to `locations[i]`.
    pub(crate) fn new<I>(locations: I) -> Self
    where
        I: IntoIterator<Item = Coord<f64>>,
    {
        let entries = locations
            .into_iter()
            .enumerate()
            .map(|(position, coord)| IndexedCompetitor {
                position,
                location: [coord.x, coord.y],
            })
            .collect();
        Self {
            tree: RTree::bulk_load(entries),
        }
    }

    /// Positions of competitors that may lie within `radius_meters` of
    /// `origin`, in ascending order.
    pub(crate) fn candidates_near(&self, origin: Coord<f64>, radius_meters: f64) -> Vec<usize> {
        let envelope = search_envelope(origin, radius_meters);
        let mut positions: Vec<usize> = self
            .tree
            .locate_in_envelope_intersecting(&envelope)
            .map(|entry| entry.position)
            .collect();
        positions.sort_unstable();
        positions
    }
}

/// Conservative lon/lat envelope around `origin` covering `radius_meters`.
///
/// Falls back to the full longitude range near the poles, across the
/// antimeridian, and for radii beyond a quarter of the globe.
#[expect(
    clippy::float_arithmetic,
    reason = "envelope padding converts metres into degrees"
)]
fn search_envelope(origin: Coord<f64>, radius_meters: f64) -> AABB<[f64; 2]> {
    let lat_pad = radius_meters / METERS_PER_DEGREE_FLOOR * ENVELOPE_MARGIN;
    let south = (origin.y - lat_pad).max(-90.0);
    let north = (origin.y + lat_pad).min(90.0);
    let full_band = AABB::from_corners([-180.0, south], [180.0, north]);

    let angular = radius_meters / EARTH_RADIUS_FLOOR_M;
    if angular >= FRAC_PI_2 {
        return full_band;
    }
    let widest = south.abs().max(north.abs());
    let ratio = angular.sin() / widest.to_radians().cos();
    if !ratio.is_finite() || ratio >= 1.0 {
        return full_band;
    }

    let lon_pad = ratio.asin().to_degrees() * ENVELOPE_MARGIN;
    let west = origin.x - lon_pad;
    let east = origin.x + lon_pad;
    if west < -180.0 || east > 180.0 {
        return full_band;
    }
    AABB::from_corners([west, south], [east, north])
}

//! Great-circle distance and day-route metrics.

use crate::customer::CustomerRecord;
use serde::{Deserialize, Serialize};

pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Average field speed used to turn route distance into a time estimate.
/// A tunable planning assumption (two-wheeler on district roads), not a
/// physical constant.
pub const AVG_SPEED_KMH: f64 = 25.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Haversine distance in kilometres between two decimal-degree points.
///
/// Uses the atan2 form rather than arccos so identical and near-antipodal
/// points stay numerically stable.
pub fn distance_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

/// Derived metrics for a day's beat. Recomputed whenever the route changes,
/// never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteSummary {
    pub stop_count: usize,
    pub total_distance_km: f64,
    pub estimated_travel_hours: f64,
}

/// Closed-loop distance over the route in its given order, starting and
/// ending at `origin`, at the default field speed.
pub fn route_summary(route: &[CustomerRecord], origin: GeoPoint) -> RouteSummary {
    route_summary_at_speed(route, origin, AVG_SPEED_KMH)
}

/// Same walk with a configured average speed (config `[routing]` section).
///
/// Stops without a known location still count in `stop_count` but contribute
/// no leg; the running "previous point" only advances on located stops, so
/// the loop skips over them rather than dropping to zero.
pub fn route_summary_at_speed(
    route: &[CustomerRecord],
    origin: GeoPoint,
    speed_kmh: f64,
) -> RouteSummary {
    let mut total = 0.0;
    let mut prev = origin;
    for stop in route {
        if stop.has_location() {
            let here = GeoPoint::new(stop.lat, stop.lng);
            total += distance_km(prev, here);
            prev = here;
        }
    }
    total += distance_km(prev, origin);

    RouteSummary {
        stop_count: route.len(),
        total_distance_km: total,
        estimated_travel_hours: total / speed_kmh,
    }
}

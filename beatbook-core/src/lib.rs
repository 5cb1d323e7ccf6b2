//! beatbook-core: account model, recovery scoring, and beat-route math.
//!
//! Everything here is a pure transform over already-ingested records; feed
//! fetching and parsing live in `beatbook-ingest` and the CLI.

pub mod customer;
pub mod geo;
pub mod schedule;
pub mod scoring;
pub mod snapshot;
pub mod time;

pub use customer::{AccountStatus, CustomerRecord};
pub use geo::{
    distance_km, route_summary, route_summary_at_speed, GeoPoint, RouteSummary, AVG_SPEED_KMH,
    EARTH_RADIUS_KM,
};
pub use schedule::{day_route, BeatCalendar};
pub use scoring::{age_days, rank, recovery_score, Urgency};
pub use snapshot::Snapshot;
pub use time::{local_date, local_weekday};

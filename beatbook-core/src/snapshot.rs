//! One complete generation of derived state: ranked accounts, today's beat,
//! route metrics.
//!
//! A refresh builds the whole snapshot before anything observes it, so a
//! consumer sees either the previous generation or this one, never a mix.

use crate::customer::CustomerRecord;
use crate::geo::{route_summary_at_speed, GeoPoint, RouteSummary, AVG_SPEED_KMH};
use crate::schedule::{day_route, BeatCalendar};
use crate::scoring::rank;
use chrono::{DateTime, Datelike, Utc, Weekday};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub generated_at: DateTime<Utc>,
    /// Day the beat was resolved for (agent-local calendar day).
    pub beat_day: Weekday,
    /// Full collection, descending by recovery score.
    pub ranked: Vec<CustomerRecord>,
    /// Today's stops in ingestion order (see `schedule::day_route`).
    pub route: Vec<CustomerRecord>,
    /// Home base this generation's distances were measured from. Kept in
    /// the snapshot so renderers agree with `summary` even if the config
    /// changes between refreshes.
    pub origin: GeoPoint,
    pub summary: RouteSummary,
}

impl Snapshot {
    /// Assemble a generation from freshly normalized records.
    ///
    /// The day route is cut from the ingestion order *before* ranking; the
    /// ranked list is a separate view of the same records.
    pub fn build(
        records: Vec<CustomerRecord>,
        now: DateTime<Utc>,
        beat_day: Weekday,
        calendar: &BeatCalendar,
        origin: GeoPoint,
    ) -> Self {
        Self::build_with_speed(records, now, beat_day, calendar, origin, AVG_SPEED_KMH)
    }

    /// `build` with a configured average speed for the travel estimate.
    pub fn build_with_speed(
        records: Vec<CustomerRecord>,
        now: DateTime<Utc>,
        beat_day: Weekday,
        calendar: &BeatCalendar,
        origin: GeoPoint,
        speed_kmh: f64,
    ) -> Self {
        let route = day_route(&records, calendar.areas_for(beat_day));
        let summary = route_summary_at_speed(&route, origin, speed_kmh);

        let mut ranked = records;
        rank(&mut ranked, now);

        Snapshot {
            generated_at: now,
            beat_day,
            ranked,
            route,
            origin,
            summary,
        }
    }

    /// Convenience for callers that resolve the beat day from `now` in UTC.
    /// The CLI resolves it in the agent's timezone instead.
    pub fn build_for_utc_day(
        records: Vec<CustomerRecord>,
        now: DateTime<Utc>,
        calendar: &BeatCalendar,
        origin: GeoPoint,
    ) -> Self {
        Self::build(records, now, now.weekday(), calendar, origin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::customer::sample_record;
    use crate::scoring::recovery_score;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 3, 9, 0, 0).unwrap() // a Monday
    }

    fn hq() -> GeoPoint {
        GeoPoint::new(20.9964, 83.0526)
    }

    fn customer(name: &str, area: &str, days_ago: i64) -> CustomerRecord {
        let mut c = sample_record();
        c.name = name.to_string();
        c.area = area.to_string();
        c.last_sale_date = Some(now().date_naive() - chrono::Duration::days(days_ago));
        c
    }

    /// Regression test: ranking must not reorder the day route.
    #[test]
    fn test_route_order_independent_of_ranking() {
        let records = vec![
            customer("First", "Juria", 10),   // low score, first in feed
            customer("Second", "Juria", 120), // high score, second in feed
            customer("Elsewhere", "Belpara", 120),
        ];
        let snap = Snapshot::build(records, now(), Weekday::Mon, &BeatCalendar::default(), hq());

        let route_names: Vec<&str> = snap.route.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(route_names, ["First", "Second"]);

        // Ranked view leads with the higher score regardless of feed order.
        assert_eq!(snap.ranked[0].name, "Second");
        assert!(
            recovery_score(&snap.ranked[0], now()) >= recovery_score(&snap.ranked[1], now())
        );
    }

    #[test]
    fn test_summary_matches_route() {
        let records = vec![customer("A", "Juria", 10), customer("B", "Juria", 10)];
        let snap = Snapshot::build(records, now(), Weekday::Mon, &BeatCalendar::default(), hq());
        assert_eq!(snap.summary.stop_count, snap.route.len());
        assert!(snap.summary.total_distance_km > 0.0);
    }

    #[test]
    fn test_off_day_yields_empty_route() {
        let records = vec![customer("A", "Juria", 10)];
        let snap = Snapshot::build(records, now(), Weekday::Sun, &BeatCalendar::default(), hq());
        assert!(snap.route.is_empty());
        assert_eq!(snap.summary.stop_count, 0);
        assert_eq!(snap.summary.total_distance_km, 0.0);
        // The ranked collection is untouched by the schedule.
        assert_eq!(snap.ranked.len(), 1);
    }

    /// Regression test: the snapshot carries its own origin and the speed
    /// used for the estimate, so render-time config drift cannot skew it.
    #[test]
    fn test_snapshot_pins_origin_and_speed() {
        let records = vec![customer("A", "Juria", 10)];
        let snap = Snapshot::build_with_speed(
            records,
            now(),
            Weekday::Mon,
            &BeatCalendar::default(),
            hq(),
            12.5,
        );
        assert_eq!(snap.origin, hq());
        assert!(
            (snap.summary.estimated_travel_hours - snap.summary.total_distance_km / 12.5).abs()
                < 1e-12
        );
    }

    #[test]
    fn test_build_for_utc_day_uses_utc_weekday() {
        let records = vec![customer("A", "Juria", 10)];
        let snap = Snapshot::build_for_utc_day(records, now(), &BeatCalendar::default(), hq());
        assert_eq!(snap.beat_day, Weekday::Mon);
        assert_eq!(snap.route.len(), 1);
    }

    #[test]
    fn test_snapshot_json_round_trip() {
        let mut unlocated = customer("A", "Juria", 10);
        unlocated.lat = f64::NAN;
        let snap = Snapshot::build(
            vec![unlocated],
            now(),
            Weekday::Mon,
            &BeatCalendar::default(),
            hq(),
        );
        let json = serde_json::to_string(&snap).unwrap();
        let back: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.route.len(), 1);
        assert!(back.route[0].lat.is_nan());
        assert_eq!(back.beat_day, Weekday::Mon);
        assert_eq!(back.origin, hq());
    }
}

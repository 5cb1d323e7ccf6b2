//! End-to-end: raw feed text through parsing, normalization, and snapshot
//! assembly, pinning the behaviors the field app depends on.

use beatbook_core::{
    recovery_score, BeatCalendar, CustomerRecord, GeoPoint, Snapshot, Urgency,
};
use beatbook_ingest::{ingest, FeedSchema};
use chrono::{DateTime, TimeZone, Utc, Weekday};

fn hq() -> GeoPoint {
    GeoPoint::new(20.9964, 83.0526)
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 3, 9, 0, 0).unwrap() // a Monday
}

/// Header plus three accounts: one in Juria (Monday's beat), one blocked in
/// Belpara with an ancient last sale, one nameless row that must vanish.
fn feed_text() -> String {
    let header: Vec<String> = (0..24).map(|i| format!("c{i}")).collect();
    let mut acme = vec![String::new(); 24];
    acme[0] = "Acme".into();
    acme[1] = "Juria".into();
    acme[2] = "Active".into();
    acme[5] = "1500".into();
    acme[6] = "50000".into();
    acme[13] = "9876500000".into();
    acme[14] = "21.0".into();
    acme[15] = "83.05".into();
    acme[18] = "2024-01-01".into();
    acme[19] = "2000".into();
    acme[20] = "2024-05-01".into();
    acme[21] = "1800".into();
    acme[22] = "3".into();
    acme[23] = "R1".into();

    let mut blocked = vec![String::new(); 24];
    blocked[0] = "\"Sahu, Brothers\"".into();
    blocked[1] = "Belpara".into();
    blocked[2] = "Blocked".into();
    blocked[5] = "42000".into();
    blocked[18] = "2023-01-01".into();

    let mut nameless = vec![String::new(); 24];
    nameless[1] = "Juria".into();

    [header, acme, blocked, nameless]
        .map(|r| r.join(","))
        .join("\n")
        + "\n"
}

fn records() -> Vec<CustomerRecord> {
    ingest(&feed_text(), &FeedSchema::default())
}

#[test]
fn test_ingest_drops_header_and_nameless_rows() {
    let records = records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].name, "Acme");
    // The quoted embedded comma survived as one field.
    assert_eq!(records[1].name, "Sahu, Brothers");
}

#[test]
fn test_monday_beat_contains_the_juria_account() {
    let snap = Snapshot::build(records(), now(), Weekday::Mon, &BeatCalendar::default(), hq());
    assert_eq!(snap.route.len(), 1);
    assert_eq!(snap.route[0].name, "Acme");

    // HQ to Acme and back: small positive ride, well under 2 km.
    assert!(snap.summary.total_distance_km > 0.0);
    assert!(snap.summary.total_distance_km < 2.0);
    assert_eq!(snap.summary.stop_count, 1);
}

#[test]
fn test_blocked_stale_account_tops_the_ranking() {
    let snap = Snapshot::build(records(), now(), Weekday::Mon, &BeatCalendar::default(), hq());
    assert_eq!(snap.ranked[0].name, "Sahu, Brothers");
    assert!(
        recovery_score(&snap.ranked[0], now()) > recovery_score(&snap.ranked[1], now())
    );
    assert_eq!(Urgency::classify(&snap.ranked[0], now()), Urgency::Blocked);
}

#[test]
fn test_sunday_beat_is_empty_whatever_the_data() {
    let snap = Snapshot::build(records(), now(), Weekday::Sun, &BeatCalendar::default(), hq());
    assert!(snap.route.is_empty());
    assert_eq!(snap.summary.total_distance_km, 0.0);
    assert_eq!(snap.ranked.len(), 2);
}

#[test]
fn test_unlocated_stop_counts_but_adds_no_distance() {
    let mut text = feed_text();
    // Second Juria account with no coordinates.
    text.push_str("Tushura Kirana,Juria\n");
    let records = ingest(&text, &FeedSchema::default());
    let snap = Snapshot::build(records, now(), Weekday::Mon, &BeatCalendar::default(), hq());

    assert_eq!(snap.summary.stop_count, 2);
    let located_only = Snapshot::build(
        ingest(&feed_text(), &FeedSchema::default()),
        now(),
        Weekday::Mon,
        &BeatCalendar::default(),
        hq(),
    );
    assert!(
        (snap.summary.total_distance_km - located_only.summary.total_distance_km).abs() < 1e-9
    );
}

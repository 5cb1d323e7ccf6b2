//! Recovery-priority scoring: rank accounts by how urgently they need a
//! collection visit.
//!
//! Scores are rank keys only. Magnitudes are not meaningful beyond "higher
//! means visit sooner", so the weights below are ordering levers, not money.

use crate::customer::CustomerRecord;
use chrono::{DateTime, Utc};
use std::cmp::Ordering;

/// Flat bonus for an account the distributor has blocked.
pub const BLOCKED_BONUS: f64 = 1000.0;
/// Bonus when the last sale is more than 90 days old.
pub const STALE_90_BONUS: f64 = 500.0;
/// Bonus when the last sale is more than 60 (but not 90) days old.
pub const STALE_60_BONUS: f64 = 300.0;

const MS_PER_DAY: i64 = 86_400_000;

/// Whole days since the last sale, floored. Future-dated sales come out
/// negative and are passed through as-is; the feed occasionally carries them
/// and the ranking tolerates it.
pub fn age_days(customer: &CustomerRecord, now: DateTime<Utc>) -> Option<i64> {
    let date = customer.last_sale_date?;
    let midnight = date.and_hms_opt(0, 0, 0)?.and_utc();
    Some((now - midnight).num_milliseconds().div_euclid(MS_PER_DAY))
}

/// Additive recovery score.
///
/// No last-sale date means no scoreable basis: exactly 0, regardless of
/// status or balance. Otherwise: blocked bonus, one age bracket at most,
/// plus due/1000 as a continuous tie-breaker between otherwise equal
/// accounts.
pub fn recovery_score(customer: &CustomerRecord, now: DateTime<Utc>) -> f64 {
    let Some(age) = age_days(customer, now) else {
        return 0.0;
    };

    let mut score = 0.0;
    if customer.status.is_blocked() {
        score += BLOCKED_BONUS;
    }
    if age > 90 {
        score += STALE_90_BONUS;
    } else if age > 60 {
        score += STALE_60_BONUS;
    }
    score + customer.due / 1000.0
}

/// Sort a freshly ingested collection descending by recovery score.
/// Ties keep no particular order beyond the sort being stable.
pub fn rank(customers: &mut [CustomerRecord], now: DateTime<Utc>) {
    customers.sort_by(|a, b| {
        recovery_score(b, now)
            .partial_cmp(&recovery_score(a, now))
            .unwrap_or(Ordering::Equal)
    });
}

/// Display classification derived from the same predicates as the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Urgency {
    /// No sale history at all.
    NoHistory,
    Blocked,
    /// Last sale more than 90 days ago.
    Overdue,
    /// Last sale more than 60 days ago.
    Aging,
    Normal,
}

impl Urgency {
    pub fn classify(customer: &CustomerRecord, now: DateTime<Utc>) -> Self {
        let Some(age) = age_days(customer, now) else {
            return Urgency::NoHistory;
        };
        if customer.status.is_blocked() {
            Urgency::Blocked
        } else if age > 90 {
            Urgency::Overdue
        } else if age > 60 {
            Urgency::Aging
        } else {
            Urgency::Normal
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Urgency::NoHistory => "no history",
            Urgency::Blocked => "BLOCKED",
            Urgency::Overdue => "overdue 90+",
            Urgency::Aging => "aging 60+",
            Urgency::Normal => "ok",
        }
    }
}

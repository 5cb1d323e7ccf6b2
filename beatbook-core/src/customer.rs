//! Customer/account model produced by feed ingestion.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Account standing as reported by the distributor feed.
///
/// The feed carries free-form status text; historically the only signal anyone
/// acted on was whether it mentioned "blocked". `parse` keeps that contract
/// while giving downstream code a closed set to match on, with the raw text
/// preserved in `Other` as a display fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountStatus {
    Active,
    Blocked,
    Other(String),
}

impl AccountStatus {
    /// Case-insensitive: any status text containing "blocked" counts as blocked.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let lower = trimmed.to_lowercase();
        if lower.contains("blocked") {
            AccountStatus::Blocked
        } else if lower == "active" {
            AccountStatus::Active
        } else {
            AccountStatus::Other(trimmed.to_string())
        }
    }

    pub fn is_blocked(&self) -> bool {
        matches!(self, AccountStatus::Blocked)
    }

    pub fn label(&self) -> &str {
        match self {
            AccountStatus::Active => "Active",
            AccountStatus::Blocked => "Blocked",
            AccountStatus::Other(raw) if raw.is_empty() => "-",
            AccountStatus::Other(raw) => raw,
        }
    }
}

/// One normalized account from the feed.
///
/// Records are immutable once built; a refresh replaces the whole collection
/// rather than patching individual records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerRecord {
    /// Required; rows with an empty name never become records.
    pub name: String,
    /// Free-form territory tag, matched against the beat calendar.
    pub area: String,
    /// Route tag assigned upstream.
    pub route: String,
    pub status: AccountStatus,
    pub reason: String,
    /// Outstanding balance. 0.0 when the feed value is unparsable.
    pub due: f64,
    pub business: String,
    pub avg_credit_cycle: String,
    pub last_sale_date: Option<NaiveDate>,
    pub sale_amount: String,
    pub last_collection_date: String,
    pub collection_amount: String,
    pub orders_this_month: String,
    pub reactivate_amount: String,
    pub phone: String,
    /// NaN when the feed had no usable latitude. Check finiteness, not zero:
    /// (0, 0) is a real point.
    #[serde(with = "coord")]
    pub lat: f64,
    #[serde(with = "coord")]
    pub lng: f64,
}

impl CustomerRecord {
    /// Both coordinates finite. The two are independent; one can be valid
    /// while the other is not, and such a record still has no location.
    pub fn has_location(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

/// Non-finite coordinates round-trip through JSON as null (the snapshot cache
/// is serde_json, which cannot represent NaN).
mod coord {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            serializer.serialize_some(value)
        } else {
            serializer.serialize_none()
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
    }
}

#[cfg(test)]
pub(crate) fn sample_record() -> CustomerRecord {
    CustomerRecord {
        name: "Acme Traders".to_string(),
        area: "Juria".to_string(),
        route: "R1".to_string(),
        status: AccountStatus::Active,
        reason: String::new(),
        due: 1500.0,
        business: "50000".to_string(),
        avg_credit_cycle: "30".to_string(),
        last_sale_date: NaiveDate::from_ymd_opt(2024, 1, 1),
        sale_amount: "2000".to_string(),
        last_collection_date: "2024-05-01".to_string(),
        collection_amount: "1800".to_string(),
        orders_this_month: "3".to_string(),
        reactivate_amount: String::new(),
        phone: "9876500000".to_string(),
        lat: 21.0,
        lng: 83.05,
    }
}

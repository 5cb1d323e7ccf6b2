//! Row → `CustomerRecord` normalization.
//!
//! Best-effort by design: bad numeric or date text degrades to a default
//! instead of failing the row, and only a missing name drops a row. The
//! feed is operational data keyed in by hand; rejecting it wholesale would
//! just hide accounts from the agent.

use beatbook_core::customer::{AccountStatus, CustomerRecord};
use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;

use crate::schema::FeedSchema;

/// Normalize parsed rows into customer records.
///
/// The first row is the feed header and is always discarded. Rows whose
/// name column is empty are dropped; nothing else disqualifies a row.
/// Short rows read as empty in every missing position.
pub fn normalize(rows: &[Vec<String>], schema: &FeedSchema) -> Vec<CustomerRecord> {
    rows.iter()
        .skip(1)
        .filter_map(|row| normalize_row(row, schema))
        .collect()
}

fn normalize_row(row: &[String], schema: &FeedSchema) -> Option<CustomerRecord> {
    let name = text(row, schema.name);
    if name.is_empty() {
        return None;
    }

    Some(CustomerRecord {
        name,
        area: text(row, schema.area),
        route: text(row, schema.route),
        // Parsed from the escaped text so `Other` retains markup-safe
        // content like every other text field; the "blocked"/"active"
        // matching is letters-only and unaffected by entity escaping.
        status: AccountStatus::parse(&text(row, schema.status)),
        reason: text(row, schema.reason),
        due: parse_float(field(row, schema.due)).unwrap_or(0.0),
        business: text(row, schema.business),
        avg_credit_cycle: text(row, schema.avg_credit_cycle),
        last_sale_date: parse_date(field(row, schema.last_sale_date)),
        sale_amount: text(row, schema.sale_amount),
        last_collection_date: text(row, schema.last_collection_date),
        collection_amount: text(row, schema.collection_amount),
        orders_this_month: text(row, schema.orders_this_month),
        reactivate_amount: text(row, schema.reactivate_amount),
        phone: text(row, schema.phone),
        lat: parse_float(field(row, schema.lat)).unwrap_or(f64::NAN),
        lng: parse_float(field(row, schema.lng)).unwrap_or(f64::NAN),
    })
}

/// Raw positional access; positions past the end of a short row are empty.
fn field(row: &[String], index: usize) -> &str {
    row.get(index).map(String::as_str).unwrap_or("")
}

/// Trimmed, markup-escaped text field.
fn text(row: &[String], index: usize) -> String {
    escape_markup(field(row, index).trim())
}

/// Neutralize characters with meaning in a markup context. The records end
/// up embedded in rendered views downstream; escaping here is a pure string
/// transform with no effect on scoring or routing.
pub fn escape_markup(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Permissive float coercion: take the leading numeric run and ignore any
/// trailing junk, so "1500", "1500.50", "1,500" (as "1") and "21.0 N" all
/// yield a number. Whole-field strictness is the wrong trade here; see the
/// module docs.
pub fn parse_float(value: &str) -> Option<f64> {
    static LEADING_FLOAT: OnceLock<Regex> = OnceLock::new();
    let re = LEADING_FLOAT
        .get_or_init(|| Regex::new(r"^[+-]?(\d+(\.\d*)?|\.\d+)").expect("static regex"));
    re.find(value.trim())
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

/// Feed dates are `YYYY-MM-DD`; some older exports used `MM/DD/YYYY`.
/// Anything else reads as "no date".
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%m/%d/%Y"))
        .ok()
}

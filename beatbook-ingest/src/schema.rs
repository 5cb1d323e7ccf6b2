//! Explicit column layout for the distributor feed.
//!
//! The feed is positional with no negotiated header, so the index of every
//! field of interest lives here in one place instead of as magic numbers
//! scattered through the normalizer. Upstream reordering columns is a
//! breaking change; it is handled by shipping (or configuring) a new schema,
//! never auto-detected.

use serde::{Deserialize, Serialize};

/// 0-based column index for each field the normalizer reads.
///
/// `Default` is the current upstream layout. Deserializable so a config
/// file can re-map individual columns if a distributor exports differently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedSchema {
    pub name: usize,
    pub area: usize,
    pub status: usize,
    pub reason: usize,
    pub reactivate_amount: usize,
    pub due: usize,
    pub business: usize,
    pub avg_credit_cycle: usize,
    pub phone: usize,
    pub lat: usize,
    pub lng: usize,
    pub last_sale_date: usize,
    pub sale_amount: usize,
    pub last_collection_date: usize,
    pub collection_amount: usize,
    pub orders_this_month: usize,
    pub route: usize,
}

impl Default for FeedSchema {
    fn default() -> Self {
        Self {
            name: 0,
            area: 1,
            status: 2,
            reason: 3,
            reactivate_amount: 4,
            due: 5,
            business: 6,
            avg_credit_cycle: 7,
            phone: 13,
            lat: 14,
            lng: 15,
            last_sale_date: 18,
            sale_amount: 19,
            last_collection_date: 20,
            collection_amount: 21,
            orders_this_month: 22,
            route: 23,
        }
    }
}

//! beatbook-ingest: distributor feed ingestion (delimited scanner, column
//! schema, and row normalization into `CustomerRecord`s).

pub mod delimited;
pub mod normalizer;
pub mod schema;

pub use delimited::parse;
pub use normalizer::normalize;
pub use schema::FeedSchema;

use beatbook_core::customer::CustomerRecord;

/// Full ingestion step: raw feed text to normalized records in feed order.
pub fn ingest(text: &str, schema: &FeedSchema) -> Vec<CustomerRecord> {
    normalize(&delimited::parse(text), schema)
}

//! Card catalog data model types, effect-text parsing, and batch-key
//! reconciliation.
//!
//! This crate defines the card data model without any database
//! dependencies. Consumers can use these types directly for serialization,
//! display, or passing to `carddex-db` for lookups and classification.

pub mod batch;
pub mod text_parser;
pub mod types;

pub use batch::{
    BatchCardData, BatchProductData, BatchScoreData, CardId, CardName, ProductId,
    find_missing_keys,
};
pub use text_parser::{contains_exactly_once, normalize_token, quoted_occurrences};
pub use types::*;

//! SQLite persistence layer and archetype classifier for the card catalog.
//!
//! Provides schema creation, insert operations, lookup queries, and the
//! two-stage archetype classification, backed by SQLite (via rusqlite with
//! the bundled feature) with an FTS5 index over effect text.

pub mod archetype;
pub mod operations;
pub mod products;
pub mod queries;
pub mod schema;
pub mod scores;

pub use archetype::{
    explicit_exclusions, explicit_inclusions, members_by_name, referencing_effect,
};
pub use operations::{
    StoreError, insert_card, insert_card_color, insert_product, insert_product_content,
    insert_score,
};
pub use products::{cards_by_product_id, product_summaries_by_ids};
pub use queries::{
    card_by_id, card_color_ids, cards_by_ids, cards_by_names, random_card, store_version,
};
pub use schema::{SchemaError, create_schema, open_database, open_memory};
pub use scores::{ScoreSortOrder, card_scores_by_ids, scores_by_format_and_date};

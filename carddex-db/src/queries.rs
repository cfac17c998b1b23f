//! Card lookup queries.
//!
//! Batch lookups key their results by the requested key and report the
//! keys that matched nothing through the envelope's `unknown_resources`,
//! computed with [`find_missing_keys`]. An empty requested-key set
//! short-circuits without touching the store — an `IN ()` clause is never
//! built.

use std::collections::HashMap;

use carddex_catalog::Card;
use carddex_catalog::batch::{BatchCardData, CardId, CardName, find_missing_keys};
use rusqlite::{Connection, OptionalExtension, params, params_from_iter};

use crate::operations::StoreError;

/// Column list shared by every card query.
pub(crate) const CARD_ATTRIBUTES: &str = "card_number, card_color, card_name, card_attribute, card_effect, monster_type, monster_attack, monster_defense";

// ── Single-Card Lookups ─────────────────────────────────────────────────────

/// Look up one card by its identifier.
pub fn card_by_id(conn: &Connection, card_id: &str) -> Result<Option<Card>, StoreError> {
    log::debug!("retrieving card data using ID {card_id}");
    let mut stmt = conn.prepare(&format!(
        "SELECT {CARD_ATTRIBUTES} FROM card_info WHERE card_number = ?1"
    ))?;
    stmt.query_row(params![card_id], row_to_card)
        .optional()
        .map_err(Into::into)
}

/// Pick a random card, excluding tokens and any blacklisted identifiers.
pub fn random_card(conn: &Connection, blacklist: &[String]) -> Result<Option<Card>, StoreError> {
    log::debug!("retrieving random card, {} blacklisted ID(s)", blacklist.len());

    if blacklist.is_empty() {
        let mut stmt = conn.prepare(&format!(
            "SELECT {CARD_ATTRIBUTES} FROM card_info
             WHERE card_color != 'Token'
             ORDER BY RANDOM() LIMIT 1"
        ))?;
        return stmt
            .query_row([], row_to_card)
            .optional()
            .map_err(Into::into);
    }

    let query = format!(
        "SELECT {CARD_ATTRIBUTES} FROM card_info
         WHERE card_number NOT IN ({}) AND card_color != 'Token'
         ORDER BY RANDOM() LIMIT 1",
        variable_placeholders(blacklist.len())
    );
    let mut stmt = conn.prepare(&query)?;
    stmt.query_row(params_from_iter(blacklist.iter()), row_to_card)
        .optional()
        .map_err(Into::into)
}

// ── Batch Lookups ───────────────────────────────────────────────────────────

/// Fetch cards for every requested identifier, reporting the identifiers
/// that matched nothing.
pub fn cards_by_ids(
    conn: &Connection,
    card_ids: &[CardId],
) -> Result<BatchCardData<CardId>, StoreError> {
    log::debug!("retrieving card data using {} ID(s)", card_ids.len());
    batch_cards(conn, "card_number", card_ids, |card| card.id.clone())
}

/// Fetch cards for every requested name, reporting the names that matched
/// nothing. Name matching is exact.
pub fn cards_by_names(
    conn: &Connection,
    card_names: &[CardName],
) -> Result<BatchCardData<CardName>, StoreError> {
    log::debug!("retrieving card data using {} name(s)", card_names.len());
    batch_cards(conn, "card_name", card_names, |card| card.name.clone())
}

fn batch_cards<K>(
    conn: &Connection,
    key_column: &str,
    requested: &[K],
    key_fn: fn(&Card) -> String,
) -> Result<BatchCardData<K>, StoreError>
where
    K: AsRef<str> + Clone,
{
    if requested.is_empty() {
        return Ok(BatchCardData {
            card_info: HashMap::new(),
            unknown_resources: Vec::new(),
        });
    }

    let query = format!(
        "SELECT {CARD_ATTRIBUTES} FROM card_info WHERE {key_column} IN ({})",
        variable_placeholders(requested.len())
    );
    let mut stmt = conn.prepare(&query)?;
    let rows = stmt.query_map(
        params_from_iter(requested.iter().map(|key| key.as_ref())),
        row_to_card,
    )?;

    let mut card_info = HashMap::with_capacity(requested.len());
    for card in rows {
        let card = card?;
        card_info.insert(key_fn(&card), card);
    }

    let unknown_resources = find_missing_keys(&card_info, requested);
    if !unknown_resources.is_empty() {
        log::debug!("{} requested key(s) had no match", unknown_resources.len());
    }

    Ok(BatchCardData {
        card_info,
        unknown_resources,
    })
}

// ── Store Metadata ──────────────────────────────────────────────────────────

/// IDs for all card colors currently in the store, keyed by color name.
pub fn card_color_ids(conn: &Connection) -> Result<HashMap<String, u32>, StoreError> {
    log::debug!("retrieving card colors");
    let mut stmt = conn.prepare("SELECT color_id, card_color FROM card_colors ORDER BY color_id")?;
    let rows = stmt.query_map([], |row| {
        Ok((row.get::<_, String>(1)?, row.get::<_, u32>(0)?))
    })?;
    rows.collect::<Result<HashMap<_, _>, _>>().map_err(Into::into)
}

/// Version of the SQLite library backing the store.
pub fn store_version(conn: &Connection) -> Result<String, StoreError> {
    conn.query_row("SELECT sqlite_version()", [], |row| row.get(0))
        .map_err(Into::into)
}

// ── Row Mapping Helpers ─────────────────────────────────────────────────────

pub(crate) fn row_to_card(row: &rusqlite::Row<'_>) -> rusqlite::Result<Card> {
    Ok(Card {
        id: row.get(0)?,
        color: row.get(1)?,
        name: row.get(2)?,
        attribute: row.get(3)?,
        effect: row.get(4)?,
        monster_type: row.get(5)?,
        attack: row.get(6)?,
        defense: row.get(7)?,
    })
}

/// Placeholder list for an `IN (…)` clause: `"?, ?, ?"`.
pub(crate) fn variable_placeholders(total: usize) -> String {
    match total {
        0 => String::new(),
        1 => "?".to_string(),
        n => {
            let mut placeholders = String::from("?");
            for _ in 1..n {
                placeholders.push_str(", ?");
            }
            placeholders
        }
    }
}

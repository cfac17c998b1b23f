//! Insert operations used by catalog importers and tests.

use carddex_catalog::Card;
use rusqlite::{Connection, params};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Invalid verification pattern: {0}")]
    Pattern(#[from] regex::Error),
}

// ── Card Operations ─────────────────────────────────────────────────────────

/// Register a card color with its classifier sort position.
pub fn insert_card_color(
    conn: &Connection,
    color_id: u32,
    card_color: &str,
) -> Result<(), StoreError> {
    conn.execute(
        "INSERT INTO card_colors (color_id, card_color)
         VALUES (?1, ?2)
         ON CONFLICT(card_color) DO UPDATE SET color_id = excluded.color_id",
        params![color_id, card_color],
    )?;
    Ok(())
}

/// Insert or update a card.
///
/// The color should already be registered via [`insert_card_color`] so the
/// card picks up its sort position; otherwise color-ordered queries place
/// it last.
pub fn insert_card(conn: &Connection, card: &Card) -> Result<(), StoreError> {
    conn.execute(
        "INSERT INTO card_info (card_number, color_id, card_color, card_name, card_attribute,
                                card_effect, monster_type, monster_attack, monster_defense)
         VALUES (?1, (SELECT color_id FROM card_colors WHERE card_color = ?2),
                 ?2, ?3, ?4, ?5, ?6, ?7, ?8)
         ON CONFLICT(card_number) DO UPDATE SET
             color_id = excluded.color_id,
             card_color = excluded.card_color,
             card_name = excluded.card_name,
             card_attribute = excluded.card_attribute,
             card_effect = excluded.card_effect,
             monster_type = excluded.monster_type,
             monster_attack = excluded.monster_attack,
             monster_defense = excluded.monster_defense",
        params![
            card.id,
            card.color,
            card.name,
            card.attribute,
            card.effect,
            card.monster_type,
            card.attack,
            card.defense,
        ],
    )?;
    Ok(())
}

// ── Product Operations ──────────────────────────────────────────────────────

/// Insert or update a product header row.
pub fn insert_product(
    conn: &Connection,
    product_id: &str,
    locale: &str,
    name: &str,
    product_type: &str,
    sub_type: &str,
    release_date: Option<&str>,
) -> Result<(), StoreError> {
    conn.execute(
        "INSERT INTO products (product_id, product_locale, product_name, product_type,
                               product_sub_type, product_release_date)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)
         ON CONFLICT(product_id) DO UPDATE SET
             product_locale = excluded.product_locale,
             product_name = excluded.product_name,
             product_type = excluded.product_type,
             product_sub_type = excluded.product_sub_type,
             product_release_date = excluded.product_release_date",
        params![product_id, locale, name, product_type, sub_type, release_date],
    )?;
    Ok(())
}

/// Record one printing of a card inside a product.
pub fn insert_product_content(
    conn: &Connection,
    product_id: &str,
    card_number: &str,
    position: &str,
    rarity: &str,
) -> Result<(), StoreError> {
    conn.execute(
        "INSERT OR IGNORE INTO product_contents (product_id, card_number, product_position, card_rarity)
         VALUES (?1, ?2, ?3, ?4)",
        params![product_id, card_number, position, rarity],
    )?;
    Ok(())
}

// ── Score Operations ────────────────────────────────────────────────────────

/// Record a card's restriction score for a format and effective date.
pub fn insert_score(
    conn: &Connection,
    card_number: &str,
    format: &str,
    effective_date: &str,
    score: u32,
) -> Result<(), StoreError> {
    conn.execute(
        "INSERT INTO card_scores (card_number, format, effective_date, score)
         VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(card_number, format, effective_date) DO UPDATE SET
             score = excluded.score",
        params![card_number, format, effective_date, score],
    )?;
    Ok(())
}

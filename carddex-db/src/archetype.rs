//! Two-stage archetype classification and effect-text reference search.
//!
//! Archetype membership comes in three shapes. Name membership is a plain
//! case-sensitive substring filter — substring-in-name is definitional, so
//! no verification runs. The textual variants pair a coarse full-text
//! narrowing pass in the store with a precise local regex pass: the index
//! can only say that the required phrases co-occur, while the regex
//! enforces the grammatical position the index cannot express, and it only
//! ever runs over the handful of narrowed candidates rather than the whole
//! table.

use carddex_catalog::Card;
use regex::RegexBuilder;
use rusqlite::{Connection, params};

use crate::operations::StoreError;
use crate::queries::{CARD_ATTRIBUTES, row_to_card};

/// Cards whose name contains `archetype`, case-sensitively, ordered by
/// name.
pub fn members_by_name(conn: &Connection, archetype: &str) -> Result<Vec<Card>, StoreError> {
    log::debug!("retrieving cards referencing archetype {archetype} in their name");

    let mut stmt = conn.prepare(&format!(
        "SELECT {CARD_ATTRIBUTES} FROM card_info
         WHERE card_name LIKE ?1
         ORDER BY card_name"
    ))?;
    let pattern = format!("%{archetype}%");
    let rows = stmt.query_map(params![pattern], row_to_card)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Cards declaring themselves part of `archetype` via the "This card is
/// always treated as" clause, ordered by name.
pub fn explicit_inclusions(conn: &Connection, archetype: &str) -> Result<Vec<Card>, StoreError> {
    log::debug!("retrieving cards explicitly treated as part of archetype {archetype}");
    classify_by_effect(
        conn,
        archetype,
        "This card is always treated as",
        &format!(r#"always treated as a.*"{}".*card"#, regex::escape(archetype)),
    )
}

/// Cards declaring themselves outside `archetype` via the "This card is
/// not treated as" clause, ordered by name.
pub fn explicit_exclusions(conn: &Connection, archetype: &str) -> Result<Vec<Card>, StoreError> {
    log::debug!("retrieving cards explicitly not treated as part of archetype {archetype}");
    classify_by_effect(
        conn,
        archetype,
        "This card is not treated as",
        &format!(r#"not treated as.*"{}".*card"#, regex::escape(archetype)),
    )
}

/// Narrow candidates with a required-phrase full-text query, then keep
/// only the rows whose effect text passes the verification regex.
///
/// The regex is case-insensitive, matching the collation the store applies
/// to text comparison.
fn classify_by_effect(
    conn: &Connection,
    archetype: &str,
    trigger_phrase: &str,
    verification_pattern: &str,
) -> Result<Vec<Card>, StoreError> {
    let match_expr = format!("{} AND {}", fts_phrase(trigger_phrase), fts_phrase(archetype));
    let verifier = RegexBuilder::new(verification_pattern)
        .case_insensitive(true)
        .build()?;

    let mut stmt = conn.prepare(&format!(
        "SELECT {CARD_ATTRIBUTES} FROM card_info
         WHERE rowid IN (SELECT rowid FROM card_effect_fts WHERE card_effect_fts MATCH ?1)
         ORDER BY card_name"
    ))?;
    let rows = stmt.query_map(params![match_expr], row_to_card)?;

    let mut cards = Vec::new();
    for card in rows {
        let card = card?;
        if verifier.is_match(&card.effect) {
            cards.push(card);
        }
    }
    Ok(cards)
}

/// Cards whose effect text cites at least one of the given names, ordered
/// by color then name.
///
/// Each name becomes a quoted full-text phrase and the phrases are issued
/// as one query; a card matches if any phrase appears in its effect. An
/// empty name set short-circuits to an empty result without querying the
/// store.
pub fn referencing_effect(conn: &Connection, names: &[String]) -> Result<Vec<Card>, StoreError> {
    if names.is_empty() {
        log::debug!("no card names provided, responding with empty list of references");
        return Ok(Vec::new());
    }
    log::debug!("retrieving cards referencing {} name(s) in their effect", names.len());

    let match_expr = names
        .iter()
        .map(|name| to_fulltext_phrase(name))
        .collect::<Vec<_>>()
        .join(" OR ");

    let mut stmt = conn.prepare(&format!(
        "SELECT {CARD_ATTRIBUTES} FROM card_info
         WHERE rowid IN (SELECT rowid FROM card_effect_fts WHERE card_effect_fts MATCH ?1)
         ORDER BY color_id, card_name"
    ))?;
    let rows = stmt.query_map(params![match_expr], row_to_card)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Convert a card name to a full-text phrase: hyphens become spaces, runs
/// of whitespace collapse, and the result is quoted so only consecutive
/// word matches count.
fn to_fulltext_phrase(name: &str) -> String {
    let collapsed = name
        .replace('-', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    fts_phrase(&collapsed)
}

/// Quote a string as a single full-text phrase, escaping embedded quotes.
fn fts_phrase(text: &str) -> String {
    format!("\"{}\"", text.replace('"', "\"\""))
}

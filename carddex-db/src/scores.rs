//! Restriction-score lookups.

use std::collections::HashMap;

use carddex_catalog::batch::{BatchScoreData, CardId, find_missing_keys};
use carddex_catalog::{CardScore, CardScoreEntry, ScoreEntry};
use rusqlite::{Connection, params, params_from_iter};

use crate::operations::StoreError;
use crate::queries::{row_to_card, variable_placeholders};

/// Sort orders for a format-wide score listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreSortOrder {
    CardName,
    ScoreThenColor,
}

/// All scored cards for a format and effective date.
pub fn scores_by_format_and_date(
    conn: &Connection,
    format: &str,
    effective_date: &str,
    order: ScoreSortOrder,
) -> Result<Vec<CardScoreEntry>, StoreError> {
    log::debug!("retrieving scores using format {format} and date {effective_date}");

    let order_clause = match order {
        ScoreSortOrder::CardName => "ci.card_name",
        ScoreSortOrder::ScoreThenColor => "cs.score DESC, ci.card_color, ci.card_name",
    };
    let query = format!(
        "SELECT ci.card_number, ci.card_color, ci.card_name, ci.card_attribute, ci.card_effect,
                ci.monster_type, ci.monster_attack, ci.monster_defense, cs.score
         FROM card_scores cs
         JOIN card_info ci ON ci.card_number = cs.card_number
         WHERE cs.format = ?1 AND cs.effective_date = ?2
         ORDER BY {order_clause}"
    );
    let mut stmt = conn.prepare(&query)?;
    let rows = stmt.query_map(params![format, effective_date], |row| {
        Ok(CardScoreEntry {
            card: row_to_card(row)?,
            score: row.get(8)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Fetch score history for every requested card, newest effective date
/// first, reporting the identifiers with no recorded score.
pub fn card_scores_by_ids(
    conn: &Connection,
    card_ids: &[CardId],
) -> Result<BatchScoreData<CardId>, StoreError> {
    if card_ids.is_empty() {
        return Ok(BatchScoreData {
            scores: HashMap::new(),
            unknown_resources: Vec::new(),
        });
    }
    log::debug!("retrieving score history for {} card(s)", card_ids.len());

    let query = format!(
        "SELECT card_number, format, effective_date, score
         FROM card_scores
         WHERE card_number IN ({})
         ORDER BY effective_date DESC",
        variable_placeholders(card_ids.len())
    );
    let mut stmt = conn.prepare(&query)?;
    let rows = stmt.query_map(
        params_from_iter(card_ids.iter().map(|key| key.as_ref())),
        |row| {
            Ok((
                row.get::<_, String>(0)?,
                ScoreEntry {
                    format: row.get(1)?,
                    effective_date: row.get(2)?,
                    score: row.get(3)?,
                },
            ))
        },
    )?;

    let mut scores: HashMap<String, CardScore> = HashMap::new();
    for row in rows {
        let (card_id, entry) = row?;
        scores.entry(card_id).or_default().history.push(entry);
    }

    let unknown_resources = find_missing_keys(&scores, card_ids);
    Ok(BatchScoreData {
        scores,
        unknown_resources,
    })
}

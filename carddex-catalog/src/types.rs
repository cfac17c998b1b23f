//! Data model types for the card catalog.
//!
//! These types represent the store schema entities: cards, products and
//! their contents, and restriction scores. A single canonical type covers
//! each entity; converting to transport-specific shapes is the embedding
//! service's concern.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::text_parser::normalize_token;

// ── Card ────────────────────────────────────────────────────────────────────

/// Color markers identifying a monster summoned from the extra deck.
const EXTRA_DECK_MARKERS: &[&str] = &["FUSION", "SYNCHRO", "XYZ", "PENDULUM", "LINK"];

/// Literal marker introducing the monster-effect section of a pendulum
/// extra-deck monster's effect text.
const MONSTER_EFFECT_MARKER: &str = "\n\nMonster Effect\n";

/// A single card row from the store. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    #[serde(rename = "cardID")]
    pub id: String,
    #[serde(rename = "cardColor")]
    pub color: String,
    #[serde(rename = "cardName")]
    pub name: String,
    #[serde(rename = "cardAttribute")]
    pub attribute: String,
    #[serde(rename = "cardEffect")]
    pub effect: String,
    #[serde(rename = "monsterType", skip_serializing_if = "Option::is_none", default)]
    pub monster_type: Option<String>,
    #[serde(rename = "monsterAttack", skip_serializing_if = "Option::is_none", default)]
    pub attack: Option<u32>,
    #[serde(rename = "monsterDefense", skip_serializing_if = "Option::is_none", default)]
    pub defense: Option<u32>,
}

impl Card {
    /// Whether this card is summoned from the extra deck.
    ///
    /// Judged purely by the color classification: any color containing
    /// Fusion, Synchro, Xyz, Pendulum, or Link (ignoring case) qualifies.
    /// This is the single source of truth for extra-deck status.
    pub fn is_extra_deck_monster(&self) -> bool {
        let color = self.color.to_uppercase();
        EXTRA_DECK_MARKERS
            .iter()
            .any(|marker| color.contains(marker))
    }

    /// The summoning-materials clause of an extra-deck monster's effect.
    ///
    /// Extra-deck effect text conventionally opens with a materials line
    /// followed by the effect body. Pendulum extra-deck monsters prepend a
    /// Pendulum Effect block, so for those the monster-effect section is
    /// located first and its opening line taken instead. Returns an empty
    /// string for anything not summoned from the extra deck, and the whole
    /// effect unchanged when there is no effect body to separate the
    /// materials from.
    pub fn potential_materials(&self) -> &str {
        if !self.is_extra_deck_monster() {
            return "";
        }

        let color = self.color.to_uppercase();
        let text = if color.contains("PENDULUM")
            && color != "PENDULUM-EFFECT"
            && color != "PENDULUM-NORMAL"
        {
            match self.effect.split_once(MONSTER_EFFECT_MARKER) {
                Some((_, monster_effect)) => monster_effect,
                None => self.effect.as_str(),
            }
        } else {
            self.effect.as_str()
        };

        match text.split_once('\n') {
            Some((materials, _)) => materials,
            // Single-line effect text: no separate effect body exists.
            None => self.effect.as_str(),
        }
    }

    /// Whether any of the quoted tokens, once normalized, equals this
    /// card's name (ignoring case).
    pub fn is_name_in_tokens(&self, tokens: &[String]) -> bool {
        let name = self.name.to_lowercase();
        tokens
            .iter()
            .any(|token| normalize_token(token).to_lowercase() == name)
    }
}

// ── Product ─────────────────────────────────────────────────────────────────

/// Summary row for a product (set, tin, deck) without its contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSummary {
    #[serde(rename = "productID")]
    pub id: String,
    #[serde(rename = "productLocale")]
    pub locale: String,
    #[serde(rename = "productName")]
    pub name: String,
    #[serde(rename = "productType")]
    pub product_type: String,
    #[serde(rename = "productSubType")]
    pub sub_type: String,
    #[serde(rename = "productReleaseDate")]
    pub release_date: Option<String>,
    #[serde(rename = "productTotal")]
    pub total_items: u32,
}

/// A product together with its full card contents.
#[derive(Debug, Clone, Serialize)]
pub struct Product {
    #[serde(flatten)]
    pub summary: ProductSummary,
    pub items: Vec<ProductItem>,
    #[serde(rename = "rarityDistribution")]
    pub rarity_distribution: HashMap<String, u32>,
}

/// One card slot in a product: the card, its pack position, and every
/// rarity it is printed in at that position.
#[derive(Debug, Clone, Serialize)]
pub struct ProductItem {
    pub card: Card,
    pub position: String,
    pub rarities: Vec<String>,
}

// ── Scores ──────────────────────────────────────────────────────────────────

/// One restriction-score row: a format, the date the score took effect,
/// and the score itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub format: String,
    #[serde(rename = "effectiveDate")]
    pub effective_date: String,
    pub score: u32,
}

/// Score history for a single card, newest effective date first.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CardScore {
    #[serde(rename = "scoreHistory")]
    pub history: Vec<ScoreEntry>,
}

/// A card paired with its score for a specific format and date.
#[derive(Debug, Clone, Serialize)]
pub struct CardScoreEntry {
    pub card: Card,
    pub score: u32,
}

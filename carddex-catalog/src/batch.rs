//! Batch-key reconciliation for multi-key lookups.
//!
//! Every batch endpoint answers the same follow-up: which of the keys the
//! caller asked for produced no row. [`find_missing_keys`] computes that
//! subset once, uniformly, whether the keys are card IDs, card names, or
//! product IDs, and the envelope types below report it as
//! `unknown_resources` alongside the resolved entities.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::{Card, CardScore, ProductSummary};

// ── Key types ───────────────────────────────────────────────────────────────

/// A card identifier used as a batch-request key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub String);

impl AsRef<str> for CardId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CardId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// A card name used as a batch-request key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardName(pub String);

impl AsRef<str> for CardName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CardName {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

/// A product identifier used as a batch-request key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub String);

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

// ── Reconciliation ──────────────────────────────────────────────────────────

/// Collect the requested keys that have no entry in `found`.
///
/// Output order follows the request, and the key's semantic type is
/// preserved — reconciling card names yields card names. An empty request
/// yields an empty vector; this never fails.
pub fn find_missing_keys<K, V>(found: &HashMap<String, V>, requested: &[K]) -> Vec<K>
where
    K: AsRef<str> + Clone,
{
    requested
        .iter()
        .filter(|key| !found.contains_key(key.as_ref()))
        .cloned()
        .collect()
}

// ── Batch envelopes ─────────────────────────────────────────────────────────

/// Cards resolved by a batch lookup, keyed by the requested key, plus the
/// requested keys that matched nothing.
///
/// `unknown_resources` is always present (an empty vector when every key
/// resolved) so callers can render "no missing resources" distinctly from
/// "field absent".
#[derive(Debug, Clone, Serialize)]
pub struct BatchCardData<K> {
    #[serde(rename = "cardInfo")]
    pub card_info: HashMap<String, Card>,
    #[serde(rename = "unknownResources")]
    pub unknown_resources: Vec<K>,
}

/// Product summaries resolved by a batch lookup plus the unmatched keys.
#[derive(Debug, Clone, Serialize)]
pub struct BatchProductData<K> {
    #[serde(rename = "productInfo")]
    pub product_info: HashMap<String, ProductSummary>,
    #[serde(rename = "unknownResources")]
    pub unknown_resources: Vec<K>,
}

/// Score histories resolved by a batch lookup plus the unmatched keys.
#[derive(Debug, Clone, Serialize)]
pub struct BatchScoreData<K> {
    pub scores: HashMap<String, CardScore>,
    #[serde(rename = "unknownResources")]
    pub unknown_resources: Vec<K>,
}

//! Product lookups.

use std::collections::HashMap;

use carddex_catalog::batch::{BatchProductData, ProductId, find_missing_keys};
use carddex_catalog::{Product, ProductItem, ProductSummary};
use rusqlite::{Connection, OptionalExtension, params, params_from_iter};

use crate::operations::StoreError;
use crate::queries::{row_to_card, variable_placeholders};

const PRODUCT_ATTRIBUTES: &str = "product_id, product_locale, product_name, product_type, product_sub_type, product_release_date";

/// Fetch product summaries for every requested identifier, reporting the
/// identifiers that matched nothing.
pub fn product_summaries_by_ids(
    conn: &Connection,
    product_ids: &[ProductId],
) -> Result<BatchProductData<ProductId>, StoreError> {
    if product_ids.is_empty() {
        return Ok(BatchProductData {
            product_info: HashMap::new(),
            unknown_resources: Vec::new(),
        });
    }
    log::debug!("retrieving summaries for {} product(s)", product_ids.len());

    let query = format!(
        "SELECT {PRODUCT_ATTRIBUTES},
                (SELECT COUNT(*) FROM product_contents pc WHERE pc.product_id = p.product_id)
         FROM products p
         WHERE p.product_id IN ({})",
        variable_placeholders(product_ids.len())
    );
    let mut stmt = conn.prepare(&query)?;
    let rows = stmt.query_map(
        params_from_iter(product_ids.iter().map(|key| key.as_ref())),
        row_to_product_summary,
    )?;

    let mut product_info = HashMap::with_capacity(product_ids.len());
    for summary in rows {
        let summary = summary?;
        product_info.insert(summary.id.clone(), summary);
    }

    let unknown_resources = find_missing_keys(&product_info, product_ids);
    Ok(BatchProductData {
        product_info,
        unknown_resources,
    })
}

/// Fetch a product with its full card contents, ordered by pack position.
///
/// Content rows repeat per rarity; they are folded into one item per card
/// and position with the rarities merged, while a running distribution
/// counts every rarity across the whole product.
pub fn cards_by_product_id(
    conn: &Connection,
    product_id: &str,
) -> Result<Option<Product>, StoreError> {
    log::debug!("retrieving product data using ID {product_id}");

    let mut stmt = conn.prepare(&format!(
        "SELECT {PRODUCT_ATTRIBUTES} FROM products WHERE product_id = ?1"
    ))?;
    let summary = stmt
        .query_row(params![product_id], |row| {
            Ok(ProductSummary {
                id: row.get(0)?,
                locale: row.get(1)?,
                name: row.get(2)?,
                product_type: row.get(3)?,
                sub_type: row.get(4)?,
                release_date: row.get(5)?,
                total_items: 0,
            })
        })
        .optional()?;
    let Some(mut summary) = summary else {
        return Ok(None);
    };

    let mut stmt = conn.prepare(
        "SELECT ci.card_number, ci.card_color, ci.card_name, ci.card_attribute, ci.card_effect,
                ci.monster_type, ci.monster_attack, ci.monster_defense,
                pc.product_position, pc.card_rarity
         FROM product_contents pc
         JOIN card_info ci ON ci.card_number = pc.card_number
         WHERE pc.product_id = ?1
         ORDER BY pc.product_position",
    )?;
    let rows = stmt.query_map(params![product_id], |row| {
        Ok((
            row_to_card(row)?,
            row.get::<_, String>(8)?,
            row.get::<_, String>(9)?,
        ))
    })?;

    let mut items: Vec<ProductItem> = Vec::new();
    let mut index_by_card_position: HashMap<(String, String), usize> = HashMap::new();
    let mut rarity_distribution: HashMap<String, u32> = HashMap::new();

    for row in rows {
        let (card, position, rarity) = row?;
        *rarity_distribution.entry(rarity.clone()).or_insert(0) += 1;

        // Either a new item, or another rarity of an item already seen.
        let key = (card.id.clone(), position.clone());
        match index_by_card_position.get(&key) {
            Some(&existing) => items[existing].rarities.push(rarity),
            None => {
                index_by_card_position.insert(key, items.len());
                items.push(ProductItem {
                    card,
                    position,
                    rarities: vec![rarity],
                });
            }
        }
    }

    summary.total_items = items.len() as u32;
    Ok(Some(Product {
        summary,
        items,
        rarity_distribution,
    }))
}

fn row_to_product_summary(row: &rusqlite::Row<'_>) -> rusqlite::Result<ProductSummary> {
    Ok(ProductSummary {
        id: row.get(0)?,
        locale: row.get(1)?,
        name: row.get(2)?,
        product_type: row.get(3)?,
        sub_type: row.get(4)?,
        release_date: row.get(5)?,
        total_items: row.get(6)?,
    })
}

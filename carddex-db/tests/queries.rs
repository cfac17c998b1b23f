use carddex_catalog::batch::{CardId, CardName};
use carddex_catalog::types::Card;
use carddex_db::*;

fn card(id: &str, color: &str, name: &str, effect: &str) -> Card {
    Card {
        id: id.to_string(),
        color: color.to_string(),
        name: name.to_string(),
        attribute: "DARK".to_string(),
        effect: effect.to_string(),
        monster_type: None,
        attack: None,
        defense: None,
    }
}

fn setup_db() -> rusqlite::Connection {
    let conn = open_memory().unwrap();

    insert_card_color(&conn, 1, "Normal").unwrap();
    insert_card_color(&conn, 2, "Effect").unwrap();
    insert_card_color(&conn, 3, "Fusion").unwrap();
    insert_card_color(&conn, 10, "Token").unwrap();

    insert_card(
        &conn,
        &card(
            "11111111",
            "Normal",
            "Elemental HERO Neos",
            "A new Elemental HERO has arrived from Neo-Space!",
        ),
    )
    .unwrap();
    insert_card(
        &conn,
        &card(
            "22222222",
            "Fusion",
            "Elemental HERO Flame Wingman",
            "\"Elemental HERO Avian\" + \"Elemental HERO Burstinatrix\"\nThis card gains effects in battle.",
        ),
    )
    .unwrap();
    insert_card(
        &conn,
        &card("33333333", "Token", "Sheep Token", "Special Summoned by card effects."),
    )
    .unwrap();

    conn
}

#[test]
fn card_by_id_found() {
    let conn = setup_db();
    let found = card_by_id(&conn, "11111111").unwrap();
    assert_eq!(found.unwrap().name, "Elemental HERO Neos");
}

#[test]
fn card_by_id_not_found() {
    let conn = setup_db();
    let found = card_by_id(&conn, "00000000").unwrap();
    assert!(found.is_none());
}

#[test]
fn cards_by_ids_resolves_and_reconciles() {
    let conn = setup_db();
    let requested = vec![
        CardId::from("11111111"),
        CardId::from("00000000"),
        CardId::from("22222222"),
        CardId::from("99999999"),
    ];
    let batch = cards_by_ids(&conn, &requested).unwrap();

    assert_eq!(batch.card_info.len(), 2);
    assert_eq!(batch.card_info["11111111"].name, "Elemental HERO Neos");
    assert_eq!(batch.card_info["22222222"].color, "Fusion");
    // Missing keys keep the order they were requested in.
    assert_eq!(
        batch.unknown_resources,
        vec![CardId::from("00000000"), CardId::from("99999999")]
    );
}

#[test]
fn cards_by_ids_all_resolved_has_empty_unknowns() {
    let conn = setup_db();
    let batch = cards_by_ids(&conn, &[CardId::from("11111111")]).unwrap();
    assert_eq!(batch.card_info.len(), 1);
    assert!(batch.unknown_resources.is_empty());
}

#[test]
fn cards_by_ids_empty_request_never_queries() {
    let conn = setup_db();
    let batch = cards_by_ids(&conn, &[]).unwrap();
    assert!(batch.card_info.is_empty());
    assert!(batch.unknown_resources.is_empty());
}

#[test]
fn cards_by_names_keys_results_by_name() {
    let conn = setup_db();
    let requested = vec![
        CardName::from("Elemental HERO Neos"),
        CardName::from("No Such Card"),
    ];
    let batch = cards_by_names(&conn, &requested).unwrap();

    assert_eq!(batch.card_info.len(), 1);
    assert_eq!(batch.card_info["Elemental HERO Neos"].id, "11111111");
    assert_eq!(batch.unknown_resources, vec![CardName::from("No Such Card")]);
}

#[test]
fn card_color_ids_keyed_by_color() {
    let conn = setup_db();
    let colors = card_color_ids(&conn).unwrap();
    assert_eq!(colors.len(), 4);
    assert_eq!(colors["Normal"], 1);
    assert_eq!(colors["Fusion"], 3);
}

#[test]
fn random_card_skips_tokens_and_blacklist() {
    let conn = setup_db();

    // Only one non-token card remains once the other is blacklisted.
    let picked = random_card(&conn, &["11111111".to_string()]).unwrap();
    assert_eq!(picked.unwrap().id, "22222222");

    // Token cards are never eligible.
    let picked = random_card(&conn, &["11111111".to_string(), "22222222".to_string()]).unwrap();
    assert!(picked.is_none());
}

#[test]
fn random_card_without_blacklist() {
    let conn = setup_db();
    let picked = random_card(&conn, &[]).unwrap().unwrap();
    assert_ne!(picked.color, "Token");
}

#[test]
fn store_version_reports_sqlite() {
    let conn = setup_db();
    assert!(!store_version(&conn).unwrap().is_empty());
}

use carddex_catalog::batch::CardId;
use carddex_catalog::types::Card;
use carddex_db::*;

fn card(id: &str, color: &str, name: &str) -> Card {
    Card {
        id: id.to_string(),
        color: color.to_string(),
        name: name.to_string(),
        attribute: "WATER".to_string(),
        effect: "Cannot attack the turn it is Summoned.".to_string(),
        monster_type: None,
        attack: None,
        defense: None,
    }
}

fn setup_db() -> rusqlite::Connection {
    let conn = open_memory().unwrap();

    insert_card_color(&conn, 2, "Effect").unwrap();
    insert_card_color(&conn, 3, "Fusion").unwrap();

    insert_card(&conn, &card("11111111", "Effect", "Abyss Soldier")).unwrap();
    insert_card(&conn, &card("22222222", "Effect", "Zure, Knight of Dark World")).unwrap();
    insert_card(&conn, &card("33333333", "Fusion", "Abyss Flower")).unwrap();

    insert_score(&conn, "11111111", "Advanced", "2024-01-01", 10).unwrap();
    insert_score(&conn, "11111111", "Advanced", "2024-04-01", 8).unwrap();
    insert_score(&conn, "11111111", "Traditional", "2024-01-01", 5).unwrap();
    insert_score(&conn, "22222222", "Advanced", "2024-04-01", 8).unwrap();
    insert_score(&conn, "33333333", "Advanced", "2024-04-01", 3).unwrap();

    conn
}

#[test]
fn score_history_is_newest_first_and_reconciled() {
    let conn = setup_db();
    let requested = vec![CardId::from("11111111"), CardId::from("99999999")];
    let batch = card_scores_by_ids(&conn, &requested).unwrap();

    assert_eq!(batch.scores.len(), 1);
    let history = &batch.scores["11111111"].history;
    assert_eq!(history.len(), 3);
    assert_eq!(history[0].effective_date, "2024-04-01");

    assert_eq!(batch.unknown_resources, vec![CardId::from("99999999")]);
}

#[test]
fn score_history_empty_request_never_queries() {
    let conn = setup_db();
    let batch = card_scores_by_ids(&conn, &[]).unwrap();
    assert!(batch.scores.is_empty());
    assert!(batch.unknown_resources.is_empty());
}

#[test]
fn format_listing_ordered_by_name() {
    let conn = setup_db();
    let entries =
        scores_by_format_and_date(&conn, "Advanced", "2024-04-01", ScoreSortOrder::CardName)
            .unwrap();

    let names: Vec<&str> = entries.iter().map(|e| e.card.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Abyss Flower", "Abyss Soldier", "Zure, Knight of Dark World"]
    );
}

#[test]
fn format_listing_ordered_by_score_then_color() {
    let conn = setup_db();
    let entries =
        scores_by_format_and_date(&conn, "Advanced", "2024-04-01", ScoreSortOrder::ScoreThenColor)
            .unwrap();

    let scores: Vec<u32> = entries.iter().map(|e| e.score).collect();
    assert_eq!(scores, vec![8, 8, 3]);
    // Equal scores fall back to color then name.
    assert_eq!(entries[0].card.name, "Abyss Soldier");
    assert_eq!(entries[1].card.name, "Zure, Knight of Dark World");
}

#[test]
fn unknown_format_yields_empty_listing() {
    let conn = setup_db();
    let entries =
        scores_by_format_and_date(&conn, "Goat", "2024-04-01", ScoreSortOrder::CardName).unwrap();
    assert!(entries.is_empty());
}

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
    insert_card_color(&conn, 6, "Spell").unwrap();
    insert_card_color(&conn, 7, "Trap").unwrap();

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
            "Effect",
            "Elemental HERO Stratos",
            "You can add 1 \"HERO\" monster from your Deck to your hand.",
        ),
    )
    .unwrap();
    // Lowercase "hero" in the name; must not count as a HERO member.
    insert_card(
        &conn,
        &card(
            "33333333",
            "Effect",
            "Unsung hero of the Realm",
            "Cannot be destroyed by battle.",
        ),
    )
    .unwrap();
    insert_card(
        &conn,
        &card(
            "44444444",
            "Normal",
            "Summoned Skull",
            "(This card is always treated as an \"Archfiend\" card.)\nA fiend with dark powers.",
        ),
    )
    .unwrap();
    // Matches both full-text phrases but not the verification regex: the
    // quoted archetype appears before the trigger clause, not inside it.
    insert_card(
        &conn,
        &card(
            "55555555",
            "Effect",
            "Ritual Disguise",
            "If you control an \"Archfiend\" monster: This card is always treated as a Ritual Monster.",
        ),
    )
    .unwrap();
    insert_card(
        &conn,
        &card(
            "66666666",
            "Effect",
            "Imitation Dragon",
            "This card is not treated as a \"Red-Eyes\" card while on the field.",
        ),
    )
    .unwrap();
    insert_card(
        &conn,
        &card(
            "77777777",
            "Spell",
            "Neo Space",
            "\"Elemental HERO Neos\" gains 500 ATK.",
        ),
    )
    .unwrap();
    insert_card(
        &conn,
        &card(
            "88888888",
            "Trap",
            "Burst Stream",
            "If \"Blue-Eyes White Dragon\" is on the field: destroy all monsters your opponent controls.",
        ),
    )
    .unwrap();

    conn
}

// ── Name Membership ─────────────────────────────────────────────────────────

#[test]
fn members_by_name_is_case_sensitive_and_name_ordered() {
    let conn = setup_db();
    let members = members_by_name(&conn, "HERO").unwrap();

    let names: Vec<&str> = members.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Elemental HERO Neos", "Elemental HERO Stratos"]);
}

#[test]
fn members_by_name_empty_for_unknown_archetype() {
    let conn = setup_db();
    assert!(members_by_name(&conn, "Madolche").unwrap().is_empty());
}

// ── Explicit Inclusions / Exclusions ────────────────────────────────────────

#[test]
fn explicit_inclusions_require_the_verification_regex() {
    let conn = setup_db();
    let included = explicit_inclusions(&conn, "Archfiend").unwrap();

    // The decoy co-occurrence card is narrowed in by full-text search but
    // rejected by the regex stage.
    let names: Vec<&str> = included.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Summoned Skull"]);
}

#[test]
fn explicit_inclusions_empty_when_nothing_declares_membership() {
    let conn = setup_db();
    assert!(explicit_inclusions(&conn, "Red-Eyes").unwrap().is_empty());
}

#[test]
fn explicit_exclusions_match_the_not_treated_clause() {
    let conn = setup_db();
    let excluded = explicit_exclusions(&conn, "Red-Eyes").unwrap();

    let names: Vec<&str> = excluded.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Imitation Dragon"]);
}

#[test]
fn explicit_exclusions_empty_for_unrelated_archetype() {
    let conn = setup_db();
    assert!(explicit_exclusions(&conn, "Archfiend").unwrap().is_empty());
}

// ── Reference Search ────────────────────────────────────────────────────────

#[test]
fn referencing_effect_finds_quoted_citations() {
    let conn = setup_db();
    let refs = referencing_effect(&conn, &["Elemental HERO Neos".to_string()]).unwrap();

    let names: Vec<&str> = refs.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Neo Space"]);
}

#[test]
fn referencing_effect_converts_hyphens_to_phrase_words() {
    let conn = setup_db();
    let refs = referencing_effect(&conn, &["Blue-Eyes White Dragon".to_string()]).unwrap();

    let names: Vec<&str> = refs.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Burst Stream"]);
}

#[test]
fn referencing_effect_matches_any_phrase_ordered_by_color() {
    let conn = setup_db();
    let refs = referencing_effect(
        &conn,
        &[
            "Blue-Eyes White Dragon".to_string(),
            "Elemental HERO Neos".to_string(),
        ],
    )
    .unwrap();

    // "Burst Stream" sorts first by name, but color order wins: the Spell
    // (color 6) precedes the Trap (color 7).
    let names: Vec<&str> = refs.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Neo Space", "Burst Stream"]);
}

#[test]
fn referencing_effect_short_circuits_on_empty_input() {
    let conn = setup_db();
    assert!(referencing_effect(&conn, &[]).unwrap().is_empty());
}

#[test]
fn referencing_effect_collapses_repeated_whitespace() {
    let conn = setup_db();
    let refs = referencing_effect(&conn, &["Elemental  HERO   Neos".to_string()]).unwrap();
    assert_eq!(refs.len(), 1);
}

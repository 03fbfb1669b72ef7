use rickandmorty_api::types::{Character, CharacterListing, LifeStatus};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

#[test]
fn deserialize_characters_full() {
    let json = load_fixture("characters.json");
    let characters: Vec<Character> = serde_json::from_str(&json).unwrap();
    assert_eq!(characters.len(), 2);

    let rick = &characters[0];
    assert_eq!(rick.id, 1);
    assert_eq!(rick.name, "Rick Sanchez");
    assert_eq!(rick.status_raw, "Alive");
    assert_eq!(rick.species, "Human");
    assert_eq!(rick.kind, "");
    assert_eq!(rick.gender, "Male");
    assert_eq!(rick.origin.name, "Earth (C-137)");
    assert_eq!(rick.origin.url, "https://rickandmortyapi.com/api/location/1");
    assert_eq!(rick.location.name, "Citadel of Ricks");
    assert_eq!(
        rick.image_url,
        "https://rickandmortyapi.com/api/character/avatar/1.jpeg"
    );
    assert_eq!(rick.episode_urls.len(), 2);
    assert_eq!(rick.url, "https://rickandmortyapi.com/api/character/1");
    assert_eq!(rick.created_at, "2017-11-04T18:48:46.250Z");
    assert_eq!(rick.life_status(), LifeStatus::Alive);
    assert_eq!(rick.first_episode_number().as_deref(), Some("1"));

    let adjudicator = &characters[1];
    assert_eq!(adjudicator.life_status(), LifeStatus::Dead);
    assert_eq!(adjudicator.first_episode_number().as_deref(), Some("28"));
}

#[test]
fn characters_survive_reencoding() {
    let json = load_fixture("characters.json");
    let characters: Vec<Character> = serde_json::from_str(&json).unwrap();

    let encoded = serde_json::to_value(&characters).unwrap();
    let original: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(encoded, original);

    let decoded: Vec<Character> = serde_json::from_value(encoded).unwrap();
    assert_eq!(decoded, characters);
}

#[test]
fn listing_accepts_bare_array() {
    let json = load_fixture("characters.json");
    let listing: CharacterListing = serde_json::from_str(&json).unwrap();
    assert!(matches!(listing, CharacterListing::List(_)));
    assert_eq!(listing.into_characters().len(), 2);
}

#[test]
fn listing_accepts_envelope() {
    let json = load_fixture("character_page.json");
    let listing: CharacterListing = serde_json::from_str(&json).unwrap();
    match &listing {
        CharacterListing::Page { info, results } => {
            assert_eq!(info.count, 1);
            assert_eq!(info.pages, 1);
            assert!(info.next.is_none());
            assert_eq!(results.len(), 1);
        }
        CharacterListing::List(_) => panic!("expected envelope"),
    }
    let characters = listing.into_characters();
    assert_eq!(characters[0].name, "Abadango Cluster Princess");
}

#[test]
fn deserialize_missing_required_fields_returns_error() {
    let json = r#"[{"id": 1, "name": "Rick Sanchez"}]"#;
    let result = serde_json::from_str::<Vec<Character>>(json);
    assert!(result.is_err());
}

#[test]
fn deserialize_malformed_json_returns_error() {
    let bad_json = r#"[{"id": not valid json}]"#;
    assert!(serde_json::from_str::<CharacterListing>(bad_json).is_err());
}

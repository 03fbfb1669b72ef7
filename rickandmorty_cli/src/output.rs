use rickandmorty_lib::types::Character;
use rickandmorty_lib::SearchState;
use tabled::{Table, Tabled};

#[derive(Clone, Debug)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Tabled)]
struct CharacterRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Species")]
    species: String,
    #[tabled(rename = "Gender")]
    gender: String,
    #[tabled(rename = "Last Location")]
    location: String,
    #[tabled(rename = "First Seen")]
    first_seen: String,
}

fn build_character_rows(characters: &[Character]) -> Vec<CharacterRow> {
    characters
        .iter()
        .map(|c| CharacterRow {
            id: c.id,
            name: c.name.clone(),
            status: c.life_status().to_string(),
            species: if c.kind.is_empty() {
                c.species.clone()
            } else {
                format!("{} ({})", c.species, c.kind)
            },
            gender: c.gender.clone(),
            location: c.location.name.clone(),
            first_seen: c
                .first_episode_number()
                .map(|ep| format!("Episode {}", ep))
                .unwrap_or_else(|| "-".to_string()),
        })
        .collect()
}

pub fn print_characters_table(characters: &[Character]) {
    println!("{}", Table::new(build_character_rows(characters)));
}

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

/// One line (or table) per state change.
pub fn print_state(state: &SearchState, format: &OutputFormat) {
    match format {
        OutputFormat::Json => print_json(state),
        OutputFormat::Table => match state {
            SearchState::Idle => println!("[idle]"),
            SearchState::Loading { query } => println!("[loading] searching for '{}'...", query),
            SearchState::Loaded { characters } if characters.is_empty() => {
                println!("[loaded] no characters")
            }
            SearchState::Loaded { characters } => {
                println!("[loaded] {} characters", characters.len());
                print_characters_table(characters);
            }
            SearchState::Error { message } => println!("[error] {}", message),
        },
    }
}

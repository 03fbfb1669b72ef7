use serde::{Deserialize, Serialize};

use super::Character;

/// Paging block of the listing envelope. Only decoded, never followed.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Info {
    pub count: i64,
    pub pages: i64,
    pub next: Option<String>,
    pub prev: Option<String>,
}

/// Body of a character search: either a bare array or the `{info, results}` envelope.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum CharacterListing {
    List(Vec<Character>),
    Page {
        info: Info,
        results: Vec<Character>,
    },
}

impl CharacterListing {
    pub fn into_characters(self) -> Vec<Character> {
        match self {
            CharacterListing::List(characters) => characters,
            CharacterListing::Page { results, .. } => results,
        }
    }
}

//! Character records returned by the `/character` endpoint.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A named reference to another resource (origin or last known location).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Place {
    pub name: String,
    pub url: String,
}

/// One character as returned by the API.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Character {
    pub id: i64,

    pub name: String,

    /// Status exactly as sent by the API ("Alive", "Dead", "unknown", ...).
    /// Use [`Character::life_status`] for a classified value.
    #[serde(rename = "status")]
    pub status_raw: String,

    pub species: String,

    /// Sub-species or variant; frequently empty.
    #[serde(rename = "type")]
    pub kind: String,

    pub gender: String,

    pub origin: Place,

    /// Last known location.
    pub location: Place,

    /// Avatar URL.
    #[serde(rename = "image")]
    pub image_url: String,

    /// Episode URLs in broadcast order.
    #[serde(rename = "episode")]
    pub episode_urls: Vec<String>,

    pub url: String,

    #[serde(rename = "created")]
    pub created_at: String,
}

/// Classified character status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifeStatus {
    Alive,
    Dead,
    Unknown,
}

impl fmt::Display for LifeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LifeStatus::Alive => "Alive",
            LifeStatus::Dead => "Dead",
            LifeStatus::Unknown => "Unknown",
        };
        f.write_str(s)
    }
}

impl Character {
    /// Case-insensitive classification of `status_raw`; anything unrecognized is `Unknown`.
    pub fn life_status(&self) -> LifeStatus {
        match self.status_raw.to_lowercase().as_str() {
            "alive" => LifeStatus::Alive,
            "dead" => LifeStatus::Dead,
            _ => LifeStatus::Unknown,
        }
    }

    /// Episode number of the first appearance, taken from the first episode URL.
    pub fn first_episode_number(&self) -> Option<String> {
        self.episode_urls.first().and_then(|url| digits_after_last_slash(url))
    }
}

/// Digits of the last non-empty `/`-separated segment, or `None` if it has none.
fn digits_after_last_slash(s: &str) -> Option<String> {
    let last = s.split('/').filter(|segment| !segment.is_empty()).last()?;
    let digits: String = last.chars().filter(char::is_ascii_digit).collect();
    (!digits.is_empty()).then_some(digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_status(status: &str) -> Character {
        with_episodes(status, &[])
    }

    fn with_episodes(status: &str, episodes: &[&str]) -> Character {
        Character {
            id: 1,
            name: "Rick Sanchez".to_string(),
            status_raw: status.to_string(),
            species: "Human".to_string(),
            kind: String::new(),
            gender: "Male".to_string(),
            origin: Place {
                name: "Earth (C-137)".to_string(),
                url: "https://rickandmortyapi.com/api/location/1".to_string(),
            },
            location: Place {
                name: "Citadel of Ricks".to_string(),
                url: "https://rickandmortyapi.com/api/location/3".to_string(),
            },
            image_url: "https://rickandmortyapi.com/api/character/avatar/1.jpeg".to_string(),
            episode_urls: episodes.iter().map(|e| e.to_string()).collect(),
            url: "https://rickandmortyapi.com/api/character/1".to_string(),
            created_at: "2017-11-04T18:48:46.250Z".to_string(),
        }
    }

    #[test]
    fn life_status_classification() {
        assert_eq!(with_status("Alive").life_status(), LifeStatus::Alive);
        assert_eq!(with_status("ALIVE").life_status(), LifeStatus::Alive);
        assert_eq!(with_status("Dead").life_status(), LifeStatus::Dead);
        assert_eq!(with_status("dEaD").life_status(), LifeStatus::Dead);
        assert_eq!(with_status("").life_status(), LifeStatus::Unknown);
        assert_eq!(with_status("Unknown").life_status(), LifeStatus::Unknown);
        assert_eq!(with_status("schrodinger").life_status(), LifeStatus::Unknown);
    }

    #[test]
    fn first_episode_from_url() {
        let c = with_episodes(
            "Alive",
            &[
                "https://rickandmortyapi.com/api/episode/10",
                "https://rickandmortyapi.com/api/episode/11",
            ],
        );
        assert_eq!(c.first_episode_number().as_deref(), Some("10"));
    }

    #[test]
    fn first_episode_absent_without_episodes() {
        assert_eq!(with_status("Alive").first_episode_number(), None);
    }

    #[test]
    fn first_episode_ignores_trailing_slash() {
        let c = with_episodes("Alive", &["https://rickandmortyapi.com/api/episode/28/"]);
        assert_eq!(c.first_episode_number().as_deref(), Some("28"));
    }

    #[test]
    fn first_episode_without_digits() {
        let c = with_episodes("Alive", &["https://rickandmortyapi.com/api/episode/pilot"]);
        assert_eq!(c.first_episode_number(), None);
    }
}

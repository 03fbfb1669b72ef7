//! Character search clients: the live API client and a fixed-response stand-in.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use crate::{
    executor::{build_request, NetworkExecutor, DEFAULT_TIMEOUT},
    request::{HttpMethod, RequestDescriptor},
    response::ExecutionResult,
    transport::Transport,
    types::{Character, CharacterListing, Place},
    Error,
};

/// Production base URL of the Rick and Morty API.
pub const DEFAULT_BASE_URL: &str = "https://rickandmortyapi.com/api";

/// Search characters by name.
///
/// Implemented by [`CharacterClient`] (network) and [`FixedCharacterClient`]
/// (in-memory fixture). Callers pick one at construction time.
#[async_trait]
pub trait CharacterSearch: Send + Sync {
    async fn search_by_name(&self, name: &str) -> ExecutionResult<Vec<Character>>;
}

/// HTTP client for the character search endpoint.
#[derive(Clone)]
pub struct CharacterClient {
    /// Base URL for the API. Defaults to [`DEFAULT_BASE_URL`].
    base_api_url: String,
    executor: NetworkExecutor,
}

impl CharacterClient {
    /// Creates a client pointing at the production API.
    pub fn new() -> Result<Self, Error> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str) -> Result<Self, Error> {
        Ok(Self {
            base_api_url: base_url.to_string(),
            executor: NetworkExecutor::new()?,
        })
    }

    /// Creates a client over an arbitrary transport.
    pub fn with_transport(base_url: &str, transport: Arc<dyn Transport>) -> Self {
        Self {
            base_api_url: base_url.to_string(),
            executor: NetworkExecutor::with_transport(transport),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.executor = self.executor.with_timeout(timeout);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_api_url
    }

    fn search_request(&self, name: &str) -> Result<RequestDescriptor<CharacterListing>, Error> {
        search_descriptor(&self.base_api_url, name)
    }
}

#[async_trait]
impl CharacterSearch for CharacterClient {
    async fn search_by_name(&self, name: &str) -> ExecutionResult<Vec<Character>> {
        let descriptor = match self.search_request(name) {
            Ok(descriptor) => descriptor,
            Err(e) => {
                tracing::error!("Could not build search request for '{}': {}", name, e);
                return ExecutionResult::failure(e, None, None);
            }
        };
        self.executor
            .execute(&descriptor)
            .await
            .map(CharacterListing::into_characters)
    }
}

/// Builds `GET <base>/character/?name=<name>` with the name percent-encoded.
fn search_descriptor(
    base_url: &str,
    name: &str,
) -> Result<RequestDescriptor<CharacterListing>, Error> {
    let mut url = Url::parse(&format!("{}/character/", base_url.trim_end_matches('/')))?;
    url.query_pairs_mut().append_pair("name", name);
    RequestDescriptor::from_url(HttpMethod::Get, url)
}

/// Returns the same characters for every query without touching the network.
#[derive(Clone)]
pub struct FixedCharacterClient {
    characters: Vec<Character>,
}

impl FixedCharacterClient {
    pub fn new(characters: Vec<Character>) -> Self {
        Self { characters }
    }
}

impl Default for FixedCharacterClient {
    /// A single "Alien Morty" record.
    fn default() -> Self {
        Self::new(vec![alien_morty()])
    }
}

#[async_trait]
impl CharacterSearch for FixedCharacterClient {
    async fn search_by_name(&self, name: &str) -> ExecutionResult<Vec<Character>> {
        let request = search_descriptor(DEFAULT_BASE_URL, name)
            .ok()
            .map(|descriptor| build_request(&descriptor, DEFAULT_TIMEOUT));
        ExecutionResult::success(self.characters.clone(), request, None)
    }
}

fn alien_morty() -> Character {
    Character {
        id: 14,
        name: "Alien Morty".to_string(),
        status_raw: "unknown".to_string(),
        species: "Alien".to_string(),
        kind: String::new(),
        gender: "Male".to_string(),
        origin: Place {
            name: "unknown".to_string(),
            url: String::new(),
        },
        location: Place {
            name: "Citadel of Ricks".to_string(),
            url: "https://rickandmortyapi.com/api/location/3".to_string(),
        },
        image_url: "https://rickandmortyapi.com/api/character/avatar/14.jpeg".to_string(),
        episode_urls: vec!["https://rickandmortyapi.com/api/episode/10".to_string()],
        url: "https://rickandmortyapi.com/api/character/14".to_string(),
        created_at: "2017-11-04T20:51:31.373Z".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_url_uses_name_param() {
        let descriptor = search_descriptor("https://example.com/api", "rick").unwrap();
        assert_eq!(
            descriptor.url().as_str(),
            "https://example.com/api/character/?name=rick"
        );
        assert_eq!(descriptor.method(), HttpMethod::Get);
    }

    #[test]
    fn search_url_encodes_name() {
        let descriptor = search_descriptor("https://example.com/api/", "Mr. Poopy & Butthole").unwrap();
        let pairs: Vec<(String, String)> = descriptor
            .url()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            vec![("name".to_string(), "Mr. Poopy & Butthole".to_string())]
        );
    }

    #[test]
    fn bad_base_url_is_invalid_url() {
        let err = search_descriptor("not a base", "rick").unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }

    #[tokio::test]
    async fn fixed_client_returns_fixture() {
        let client = FixedCharacterClient::default();
        let outcome = client.search_by_name("anything").await;
        let characters = outcome.result.unwrap();
        assert_eq!(characters.len(), 1);
        assert_eq!(characters[0].name, "Alien Morty");
        assert_eq!(characters[0].first_episode_number().as_deref(), Some("10"));
        assert!(outcome.request.is_some());
        assert!(outcome.response.is_none());
    }
}

//! One-shot character search with input validation.

use rickandmorty_api::types::Character;
use rickandmorty_api::CharacterSearch;

use crate::error::RickAndMortyError;
use crate::validation;

/// Validates `input` and runs a single search, bypassing the debounce.
pub async fn search_characters(
    client: &dyn CharacterSearch,
    input: &str,
) -> Result<Vec<Character>, RickAndMortyError> {
    let name = validation::validate_search(input)?;
    let characters = client.search_by_name(&name).await.into_result()?;
    tracing::info!("Found {} characters matching '{}'", characters.len(), name);
    Ok(characters)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rickandmorty_api::FixedCharacterClient;

    #[tokio::test]
    async fn returns_characters() {
        let client = FixedCharacterClient::default();
        let characters = search_characters(&client, "  morty ").await.unwrap();
        assert_eq!(characters[0].name, "Alien Morty");
    }

    #[tokio::test]
    async fn rejects_blank_input() {
        let client = FixedCharacterClient::default();
        let err = search_characters(&client, " \n ").await.unwrap_err();
        assert!(matches!(err, RickAndMortyError::InvalidInput(_)));
    }
}

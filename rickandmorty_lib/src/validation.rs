use crate::error::RickAndMortyError;

pub const MAX_SEARCH_LENGTH: usize = 100;

/// Normalizes a name as typed: control characters are dropped, whitespace runs
/// collapse to one space and the ends are trimmed. The length limit counts
/// characters of the cleaned name, so padding never makes a name too long.
pub fn sanitize_text(input: &str, max_chars: usize) -> Result<String, RickAndMortyError> {
    let cleaned: String = input
        .chars()
        .filter(|c| !c.is_control() || c.is_whitespace())
        .collect();
    let sanitized = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    if sanitized.is_empty() {
        return Err(RickAndMortyError::InvalidInput(
            "search name is empty".to_string(),
        ));
    }
    let len = sanitized.chars().count();
    if len > max_chars {
        return Err(RickAndMortyError::InvalidInput(format!(
            "search name is {} characters, the limit is {}",
            len, max_chars
        )));
    }
    Ok(sanitized)
}

/// Cleans a character name search and enforces [`MAX_SEARCH_LENGTH`].
pub fn validate_search(input: &str) -> Result<String, RickAndMortyError> {
    sanitize_text(input, MAX_SEARCH_LENGTH)
}

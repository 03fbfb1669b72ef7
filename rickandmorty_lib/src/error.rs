//! Error types for the library layer.

use std::fmt;

/// Errors produced by the library layer, wrapping upstream API errors
/// and adding input validation failures.
#[derive(Debug)]
pub enum RickAndMortyError {
    /// An error from the underlying request pipeline.
    Api(rickandmorty_api::Error),
    /// User-provided input failed validation.
    InvalidInput(String),
}

impl fmt::Display for RickAndMortyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api(e) => write!(f, "API error: {}", e),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
        }
    }
}

impl std::error::Error for RickAndMortyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Api(e) => Some(e),
            Self::InvalidInput(_) => None,
        }
    }
}

impl From<rickandmorty_api::Error> for RickAndMortyError {
    fn from(e: rickandmorty_api::Error) -> Self {
        Self::Api(e)
    }
}

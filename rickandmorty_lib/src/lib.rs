//! Library layer for the character search: debounced controller, settings,
//! input validation and a one-shot search helper.
//!
//! Wraps the `rickandmorty_api` request pipeline with the state machine a
//! presentation layer observes.

pub mod config;
pub mod controller;
pub mod error;
pub mod search;
pub mod validation;

pub use rickandmorty_api;
pub use rickandmorty_api::types;
pub use rickandmorty_api::{CharacterClient, CharacterSearch, FixedCharacterClient};

pub use config::Settings;
pub use controller::{user_message, SearchController, SearchState, DEFAULT_DEBOUNCE};
pub use error::RickAndMortyError;

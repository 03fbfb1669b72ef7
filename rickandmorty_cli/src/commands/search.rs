use anyhow::Result;
use clap::Args;
use rickandmorty_lib::search::search_characters;
use rickandmorty_lib::CharacterSearch;

use crate::output::{print_characters_table, print_json, OutputFormat};

#[derive(Args)]
pub struct SearchArgs {
    /// Character name; partial names match (e.g. "rick")
    pub name: String,
}

pub async fn run(args: &SearchArgs, client: &dyn CharacterSearch, format: &OutputFormat) -> Result<()> {
    let characters = search_characters(client, &args.name).await?;

    eprintln!("{} characters found", characters.len());

    match format {
        OutputFormat::Table => print_characters_table(&characters),
        OutputFormat::Json => print_json(&characters),
    }

    Ok(())
}

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Args;
use rickandmorty_lib::{CharacterSearch, SearchController, SearchState, Settings};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time;

use crate::output::{print_state, OutputFormat};

#[derive(Args)]
pub struct WatchArgs {
    /// Answer every query with the built-in fixture instead of calling the API
    #[arg(long)]
    pub fixture: bool,

    /// Quiet period in milliseconds before a search is issued (overrides RICKANDMORTY_DEBOUNCE_MS)
    #[arg(long)]
    pub debounce_ms: Option<u64>,
}

pub async fn run(
    args: &WatchArgs,
    client: Arc<dyn CharacterSearch>,
    settings: &Settings,
    format: &OutputFormat,
) -> Result<()> {
    let debounce = args
        .debounce_ms
        .map(Duration::from_millis)
        .unwrap_or(settings.debounce);

    let controller = SearchController::spawn(client, debounce);

    let mut states = controller.subscribe();
    let printer_format = format.clone();
    let printer = tokio::spawn(async move {
        while states.changed().await.is_ok() {
            let state = states.borrow_and_update().clone();
            print_state(&state, &printer_format);
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        controller.set_query(line);
    }

    // stdin is closed: give the last input its quiet period, then wait for
    // the search it triggered.
    time::sleep(debounce + Duration::from_millis(50)).await;
    controller
        .subscribe()
        .wait_for(|state| !matches!(state, SearchState::Loading { .. }))
        .await?;

    controller.shutdown().await;
    printer.await?;
    Ok(())
}

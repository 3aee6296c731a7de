//! bpmcalc CLI - Tempo Calculator
//!
//! Command-line interface for the bpmcalc conversion engine and favorites.

use clap::Parser;
use env_logger::Env;
use log::info;

use bpmcalc::cli::commands;
use bpmcalc::cli::{Cli, Commands, FavAction};
use bpmcalc::favorites::{JsonFavoritesStore, UserId};
use bpmcalc::handler::RequestHandler;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logger
    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    info!("bpmcalc v{}", env!("CARGO_PKG_VERSION"));
    info!("Favorites store: {}", cli.favorites.display());

    let handler = RequestHandler::new(JsonFavoritesStore::new(&cli.favorites));
    let user = UserId::from(cli.user);

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Calc { bpm, json } => commands::calc(&handler, &user, &bpm, json),
        Commands::Ms { ms, note } => commands::reverse(&handler, &user, &ms, note.as_deref()),
        Commands::Fav { action } => match action {
            FavAction::Add { bpm } => commands::favorite_add(handler.store(), &user, bpm),
            FavAction::Remove { bpm } => commands::favorite_remove(handler.store(), &user, bpm),
            FavAction::Toggle { bpm } => commands::favorite_toggle(&handler, &user, bpm),
            FavAction::List => commands::favorite_list(&handler, &user),
        },
        Commands::Run => commands::run(&handler, &user),
    }
}

mod cli;
mod config;
mod errors;
mod generation;
mod layout;
mod render;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::Cli;
use crate::config::GridCatalog;
use crate::errors::AppError;
use crate::generation::{generate_card_set, GenerateOptions};
use crate::layout::{layout_cards, PageLayoutConfig};
use crate::render::{write_output, PdfRenderer};

fn main() {
    let cli = Cli::parse();

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}=info", env!("CARGO_PKG_NAME")))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(err) = run(&cli) {
        error!("{err}");
        if let Some(hint) = err.remediation() {
            eprintln!("{hint}");
        }
        std::process::exit(err.exit_code());
    }
}

fn run(cli: &Cli) -> Result<(), AppError> {
    // The grid-rules table is built once and passed by reference from here on.
    let catalog = GridCatalog::standard();

    let options = GenerateOptions {
        free_space: cli.free_space_override(),
        free_space_policy: cli.free_space_policy(),
        custom_range: cli.custom_range(),
    };

    info!(
        cards = cli.num_players,
        grid_size = cli.grid_size,
        "generating cards"
    );
    let mut rng = rand::rng();
    let cards = generate_card_set(&catalog, cli.grid_size, &options, cli.num_players, &mut rng)?;

    let grid = catalog.get(cli.grid_size)?;
    let layout_config = PageLayoutConfig {
        cards_per_page: cli.page,
        show_header_row: !cli.no_headers,
        title: cli.title.clone(),
    };
    let pages = layout_cards(&cards, grid, &layout_config);
    info!(pages = pages.len(), "laid out pages");

    let renderer = PdfRenderer::new(cli.title.as_deref().unwrap_or("Byngo Cards"));
    let bytes = renderer.render(&pages)?;
    write_output(&cli.output, &bytes)?;
    info!(path = %cli.output.display(), "finished");

    Ok(())
}

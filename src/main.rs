use clap::Parser;
use tracing::info;
use tuido::cli::commands::Cli;
use tuido::cli::handlers;
use tuido::io::store_io::JsonFileStore;
use tuido::io::{config_io, logging, paths};

fn main() {
    if let Err(e) = run(Cli::parse()) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config_path = cli.config.clone().unwrap_or_else(paths::default_config_path);
    let config = config_io::load_config(&config_path)?;

    let log_path = paths::resolve_log_path(config.log.file.as_deref());
    if let Err(e) = logging::init(&log_path, &config.log.level) {
        eprintln!(
            "warning: logging disabled, cannot open {}: {}",
            log_path.display(),
            e
        );
    }

    let data_path = paths::resolve_data_path(
        cli.data.as_deref(),
        config.data_file.as_deref(),
        &config_path,
    );
    info!(data = %data_path.display(), config = %config_path.display(), "starting");
    let store = JsonFileStore::new(data_path);

    match cli.command {
        // No subcommand launches the TUI
        None => tuido::tui::run(&store, &config),
        Some(cmd) => handlers::dispatch(cmd, &store),
    }
}

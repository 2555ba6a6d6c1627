mod cadence;
mod cli;
mod config;
mod model;
mod session;
mod store;
mod timer;
mod tui;

use std::process;

use clap::Parser;
use jiff::Timestamp;

use cli::Cli;
use config::Config;
use store::Store;

fn main() {
    let cli = Cli::parse();

    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("{e}");
        process::exit(1);
    });

    let root = config
        .data_dir
        .clone()
        .or_else(Store::default_root)
        .unwrap_or_else(|| {
            eprintln!("Could not determine home directory.");
            process::exit(1);
        });

    let store = match Store::new(root) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to initialize store: {e}");
            process::exit(1);
        }
    };

    if let Err(e) = store.ensure_defaults(Timestamp::now()) {
        eprintln!("Failed to seed defaults: {e}");
        process::exit(1);
    }

    let result = match cli.command {
        Some(command) => cli::run(&store, command),
        None => tui::run(&store, &config).map_err(|e| e.to_string()),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

mod catalog;
mod cli;
mod config;
mod generator;
mod logging;
mod model;
mod storage;

use std::process;

use clap::Parser;

use cli::Cli;
use config::Config;
use generator::RandomGenerator;
use storage::TicketStore;

fn main() {
    let cli = Cli::parse();

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            process::exit(1);
        }
    };

    logging::init(config.log_level());

    let catalog = match config.catalog() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load flights: {e}");
            process::exit(1);
        }
    };

    let path = match config.data_file(cli.data_file.as_deref()) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Failed to locate tickets file: {e}");
            process::exit(1);
        }
    };

    let store = match TicketStore::open(path, catalog, RandomGenerator) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to open ticket store: {e}");
            process::exit(1);
        }
    };

    if let Err(e) = cli::run(cli.command, &store) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

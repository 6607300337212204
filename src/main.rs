use clap::Parser;

mod cli;

use crate::cli::Cli;
use name_search::logging::init_logging;
use name_search::util::envfile::load_dotenv_if_present;

fn main() {
    // Before init_logging: .env may set RUST_LOG and NAME_SEARCH_TRACING.
    let dotenv = load_dotenv_if_present();
    init_logging();
    if let Err(e) = dotenv {
        log::warn!("could not load .env: {:#}", e);
    }

    let cli = Cli::parse();
    if let Err(e) = cli::run(cli) {
        log::error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

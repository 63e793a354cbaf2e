mod cli;
mod convert;
mod db;
mod error;
mod excel;
mod fields;
mod fmt;
mod models;
mod period;
mod resolver;
mod settings;
mod sheet;
mod statement;

use clap::Parser;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { data_dir } => cli::init::run(data_dir),
        Commands::Convert { file, output, map } => {
            cli::convert::run(&file, output.as_deref(), &map)
        }
        Commands::History { json } => cli::history::run(json),
        Commands::Stats { json } => cli::stats::run(json),
        Commands::Cleanup { days } => cli::cleanup::run(days),
        Commands::Delete { id } => cli::delete::run(id),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

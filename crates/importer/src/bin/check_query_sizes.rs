use clap::Parser;
use importer::{config::init_logging, files::compare_query_sizes};
use log::error;
use std::{path::PathBuf, process::ExitCode};

/// Checks new query extracts for truncation against the previous set
#[derive(Parser)]
#[command(name = "check-query-sizes")]
struct Cli {
    /// Print each favorable comparison
    #[arg(long, short = 'v')]
    verbose: bool,

    /// Directory of newly downloaded extracts
    #[arg(long, env = "NEW_QUERIES_DIR", default_value = "./queries")]
    new_queries: PathBuf,

    /// Directory of the extracts used last time
    #[arg(long, env = "QUERIES_DIR", default_value = "./latest_queries")]
    previous_queries: PathBuf,
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_logging(false);

    match compare_query_sizes(&cli.new_queries, &cli.previous_queries) {
        Ok(report) => {
            if cli.verbose {
                for line in report {
                    println!("{line}");
                }
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

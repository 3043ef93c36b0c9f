use clap::Parser;
use database::{db::create_connection, services::course::CourseService};
use importer::{config::init_logging, error::ImportError, hours::mismatches};
use log::{error, info};
use std::process::ExitCode;

/// Lists active courses whose component hours do not add up to their contact hours
#[derive(Parser)]
#[command(name = "check-total-hours")]
struct Cli {
    /// Log at debug level
    #[arg(long, short = 'd')]
    debug: bool,

    /// Postgres connection string
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,
}

async fn run(cli: &Cli) -> Result<usize, ImportError> {
    let db = create_connection(&cli.database_url).await?;
    let courses = CourseService::all_by_status(&db).await?;

    let lines = mismatches(&courses);
    for line in &lines {
        println!("{line}");
    }
    info!("{} of {} courses mismatched", lines.len(), courses.len());

    Ok(lines.len())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_logging(cli.debug);

    match run(&cli).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            e.exit_code()
        }
    }
}

use clap::Parser;
use database::db::create_connection;
use importer::{
    anomaly::RunLog,
    catalog::pass::{CatalogExtracts, PassOptions, populate_courses},
    config::{CommonArgs, CourseArgs, init_logging},
    error::ImportError,
};
use log::error;
use std::process::ExitCode;

/// Imports the catalog, requisites and attributes extracts into `courses`
#[derive(Parser)]
#[command(name = "populate-courses")]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,

    #[command(flatten)]
    course: CourseArgs,
}

async fn run(cli: &Cli, log: &mut RunLog<impl std::io::Write>) -> Result<(), ImportError> {
    let extracts = CatalogExtracts::locate(&cli.common.queries_dir)?;
    let options = PassOptions {
        progress: cli.common.progress,
        policy: cli.course.merge_policy(),
    };

    let db = create_connection(&cli.common.database_url).await?;
    populate_courses(&db, &extracts, &options, log).await?;

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_logging(cli.common.debug);

    let mut log = match RunLog::create(&cli.course.log_file) {
        Ok(log) => log,
        Err(e) => {
            error!("Cannot create {}: {e}", cli.course.log_file.display());
            return ExitCode::FAILURE;
        }
    };

    let result = run(&cli, &mut log).await;
    if let Err(e) = &result {
        error!("{e}");
        if let Err(write_error) = log.note(e) {
            error!("Cannot write to {}: {write_error}", cli.course.log_file.display());
        }
    }
    if let Err(e) = log.flush() {
        error!("Cannot write to {}: {e}", cli.course.log_file.display());
        if result.is_ok() {
            return ExitCode::FAILURE;
        }
    }

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => e.exit_code(),
    }
}

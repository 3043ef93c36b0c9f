use clap::Parser;
use database::db::create_connection;
use importer::{
    config::{CommonArgs, RuleArgs, init_logging},
    error::ImportError,
    rules::{RuleProgram, run},
};
use log::error;
use std::process::ExitCode;

/// Lists course ids missing from the catalog (`--generate`), or repopulates
/// `transfer_rules`
#[derive(Parser)]
#[command(name = "populate-transfer-rules")]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,

    #[command(flatten)]
    rules: RuleArgs,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_logging(cli.common.debug);

    let result: Result<(), ImportError> = async {
        let db = create_connection(&cli.common.database_url).await?;
        run(&db, RuleProgram::TransferRules, &cli.common, &cli.rules).await
    }
    .await;

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            e.exit_code()
        }
    }
}

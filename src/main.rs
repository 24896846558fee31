use std::process::ExitCode;

use clap::Parser;

use qw1_etl::application::run_import;
use qw1_etl::domain::error::Result;
use qw1_etl::domain::outcome::ImportOutcome;
use qw1_etl::infrastructure::config::EtlConfig;
use qw1_etl::interfaces::cli::{self, Cli};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let _ = tracing_subscriber::fmt()
        .with_env_filter("info")
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse();
    if !cli.output_json {
        cli::print_banner();
    }

    match run(&cli).await {
        Ok(outcome) => {
            cli::print_outcome(&outcome, cli.output_json);
            ExitCode::SUCCESS
        }
        Err(err) => {
            cli::print_failure(&err, cli.output_json);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> Result<ImportOutcome> {
    let kind = cli.import_kind()?;
    let config = EtlConfig::load()?;
    run_import(kind, &cli.file, &config).await
}

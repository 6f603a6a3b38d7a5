mod cli;

use std::process::ExitCode;

use anyhow::{Context, Result};
use appinfo_update::config::{Config, CredentialArgs, Credentials};
use appinfo_update::{LocaleDirectory, Pipeline, PipelineOptions, RunReport};
use asc_api::AppStoreConnectClient;
use clap::Parser;
use cli::{Cli, OutputFormat};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if !cli.localizations_path.is_dir() {
        return Err(anyhow::anyhow!(
            "localizations path is not a directory: {:?}",
            cli.localizations_path
        ));
    }

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => {
            let cwd = std::env::current_dir().context("failed to read working directory")?;
            Config::load_from_project(&cwd)?.unwrap_or_default()
        }
    };

    let args = CredentialArgs {
        issuer_id: cli.issuer_id.clone(),
        key_id: cli.key_id.clone(),
        private_key: cli.private_key.clone(),
    };
    let credentials = Credentials::resolve(&args, |k| std::env::var(k).ok(), &config.credentials)?;
    let key = credentials.load_key()?;

    let client = AppStoreConnectClient::new(&key)
        .context("failed to build API client")?
        .with_base_url(&config.api.base_url);

    let options = PipelineOptions {
        dry_run: cli.dry_run,
        fail_fast: cli.fail_fast,
    };
    let pipeline = Pipeline::new(&client, LocaleDirectory::new(&cli.localizations_path))
        .with_options(options);

    let report = pipeline
        .run(&cli.bundle_id)
        .await
        .with_context(|| format!("failed to update metadata for {}", cli.bundle_id))?;

    print_summary(&report, &cli.format, cli.dry_run)?;

    Ok(if report.has_failures() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn init_tracing(verbosity: u8) {
    let default = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn print_summary(report: &RunReport, format: &OutputFormat, dry_run: bool) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let summary = serde_json::json!({
                "appId": report.app_id,
                "appInfoId": report.app_info_id,
                "dryRun": dry_run,
                "locales": report.rows(),
                "unusedFiles": report.unused_files,
            });
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        OutputFormat::Table => println!("\n{}", report.summary_table()),
    }

    let verb = if dry_run { "Would update" } else { "Updated" };
    println!(
        "\n{}: {}  Skipped: {}  Failed: {}",
        verb,
        report.updated_count().to_string().green(),
        report.skipped_count().to_string().yellow(),
        report.failed_count().to_string().red()
    );

    if !report.unused_files.is_empty() {
        println!(
            "Unused localization files: {}",
            report
                .unused_files
                .iter()
                .map(|l| format!("{}.json", l))
                .collect::<Vec<_>>()
                .join(", ")
        );
    }

    Ok(())
}

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "appinfo-update")]
#[command(version, about = "Update App Store app-info metadata from localized JSON files")]
pub struct Cli {
    /// The path to the folder where the '.json' files are
    pub localizations_path: PathBuf,

    /// The bundle id of the app to update the metadata for
    #[arg(long)]
    pub bundle_id: String,

    /// API key issuer id (or ASC_ISSUER_ID)
    #[arg(long)]
    pub issuer_id: Option<String>,

    /// API key id (or ASC_KEY_ID)
    #[arg(long)]
    pub key_id: Option<String>,

    /// Path to the API key's .p8 file (or ASC_PRIVATE_KEY_PATH)
    #[arg(long)]
    pub private_key: Option<PathBuf>,

    /// Config file (defaults to .appinfo-update.toml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Validate and report without submitting anything
    #[arg(long)]
    pub dry_run: bool,

    /// Stop at the first unreadable file or failed request
    #[arg(long)]
    pub fail_fast: bool,

    /// Summary output format
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Clone, clap::ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

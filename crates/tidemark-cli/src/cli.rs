use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tidemark")]
#[command(about = "Reconcile declared cluster databases against the DigitalOcean API")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the converging action without touching the remote
    Plan(PlanArgs),
    /// Reconcile the declared state against the remote API
    Apply(ApplyArgs),
}

#[derive(Args)]
pub struct PlanArgs {
    /// Desired-state document (TOML)
    #[arg(long)]
    pub spec: PathBuf,

    /// State file written by the previous apply
    #[arg(long, default_value = "tidemark.state.toml")]
    pub state: PathBuf,

    /// Plan against an empty declaration (teardown)
    #[arg(long)]
    pub destroy: bool,
}

#[derive(Args)]
pub struct ApplyArgs {
    /// Desired-state document (TOML)
    #[arg(long)]
    pub spec: PathBuf,

    /// State file to read and refresh
    #[arg(long, default_value = "tidemark.state.toml")]
    pub state: PathBuf,

    /// Reconcile against an empty declaration (teardown)
    #[arg(long)]
    pub destroy: bool,

    /// DigitalOcean API token
    #[arg(long, env = "TIDEMARK_DO_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Override the API base URL
    #[arg(long, env = "TIDEMARK_DO_BASE_URL")]
    pub base_url: Option<String>,
}

mod cli;
mod document;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{ApplyArgs, Cli, Commands, PlanArgs};
use tidemark_do::{DoClient, DoConfig};
use tidemark_reconciler::{Reconciler, plan};

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(e) = run().await {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Plan(args) => run_plan(args),
        Commands::Apply(args) => run_apply(args).await,
    }
}

fn run_plan(args: PlanArgs) -> Result<()> {
    let spec_doc = document::load_spec(&args.spec)?;
    let state_doc = document::load_state(&args.state)?;

    let desired = (!args.destroy).then_some(&spec_doc.database);
    let observed = state_doc.database.as_ref();
    let action = plan(desired, observed)?;

    let identity = match (desired, observed) {
        (Some(d), _) => d.key().to_string(),
        (None, Some(o)) => o.key().to_string(),
        (None, None) => "(nothing)".to_string(),
    };
    println!("{action}: {identity}");
    Ok(())
}

async fn run_apply(args: ApplyArgs) -> Result<()> {
    let spec_doc = document::load_spec(&args.spec)?;
    let mut state_doc = document::load_state(&args.state)?;

    let token = args
        .token
        .context("no API token: pass --token or set TIDEMARK_DO_TOKEN")?;
    let mut config = DoConfig::new(token);
    if let Some(base_url) = args.base_url {
        config = config.with_base_url(base_url);
    }
    let client = DoClient::new(config)?;
    let reconciler = Reconciler::new(Arc::new(client));

    let desired = (!args.destroy).then_some(&spec_doc.database);

    // Refresh the observation first so the plan never acts on stale state;
    // a record deleted out-of-band simply reads as absent here.
    let observed = match state_doc.database.as_ref() {
        Some(prior) => reconciler.read(&prior.cluster_id, &prior.name).await?,
        None => None,
    };

    let new_state = reconciler.reconcile(desired, observed.as_ref()).await?;
    match &new_state {
        Some(state) => println!("converged: {}", state.key()),
        None => println!("converged: nothing managed"),
    }

    state_doc.database = new_state;
    document::save_state(&args.state, &state_doc)
}

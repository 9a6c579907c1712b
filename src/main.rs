use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use ideagenie::config::{Config, ConfigOverrides};
use ideagenie::controller::SubmissionController;
use ideagenie::navigation::{View, ViewRouter};
use ideagenie::output::{
    render_json, render_ranking, render_requests, render_results, OutputFormat,
};
use ideagenie::pages::{mount_dashboard, mount_results};
use ideagenie::scoring::{HttpScoringClient, StaticScorer};
use ideagenie::server::run_server;
use ideagenie::store::{RequestStore, ResultStore};
use ideagenie::types::ConstraintField;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "ideagenie", about = "Prioritize user-submitted feature requests")]
struct Cli {
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(short, long)]
    endpoint: Option<String>,
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    output: OutputFormat,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, clap::Args, Clone, Default)]
struct ConstraintArgs {
    /// 50-100, 150-300, 300-450, 450-600, 600+
    #[arg(long = "eng-hours")]
    available_eng_hrs: Option<String>,
    /// <10000, 10000-20000, 20000-30000, 30000-40000, >40000
    #[arg(long = "budget")]
    available_budget: Option<String>,
    /// 2, 3, 4, 5, >5
    #[arg(long = "teams")]
    teams_available: Option<String>,
    /// Weeks: 1-2, 2-4, 4-6, 6-8, 8-12
    #[arg(long = "timeline")]
    expected_timeline: Option<String>,
    /// Customer Experience, Operational Efficiency, Risk Reduction, Innovation
    #[arg(long = "focus")]
    priority_focus: Option<String>,
}

impl ConstraintArgs {
    fn selections(&self) -> Vec<(ConstraintField, String)> {
        [
            (ConstraintField::AvailableEngHrs, &self.available_eng_hrs),
            (ConstraintField::AvailableBudget, &self.available_budget),
            (ConstraintField::TeamsAvailable, &self.teams_available),
            (ConstraintField::ExpectedTimeline, &self.expected_timeline),
            (ConstraintField::PriorityFocus, &self.priority_focus),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.clone().map(|value| (field, value)))
        .collect()
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    Requests,
    Submit {
        #[command(flatten)]
        constraints: ConstraintArgs,
        /// Print the raw ranking instead of the projected results
        #[arg(long)]
        raw: bool,
    },
    Results {
        #[arg(long, default_value_t = 1)]
        select: usize,
    },
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
    Config {
        #[arg(long)]
        init: bool,
        #[arg(long)]
        show: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);
    let mut config = Config::load(Some(&config_path))?;
    config.apply_overrides(ConfigOverrides {
        endpoint: cli.endpoint.clone(),
    });

    match &cli.command {
        Commands::Requests => {
            let store = RequestStore::new();
            mount_dashboard(&store);
            println!("{}", render_requests(&store.requests(), cli.output)?);
        }
        Commands::Submit { constraints, raw } => {
            run_submit(&config, constraints, *raw, cli.output).await?;
        }
        Commands::Results { select } => {
            let requests = RequestStore::new();
            let results = ResultStore::new();
            mount_results(&requests, &results);
            print_results(&results, *select, cli.output)?;
        }
        Commands::Serve { host, port } => {
            let host = host.clone().unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);
            let bind = format!("{host}:{port}");
            let addr: SocketAddr = bind
                .parse()
                .map_err(|e| anyhow!("invalid bind address {bind}: {e}"))?;
            run_server(Arc::new(StaticScorer::demo()), addr).await?;
        }
        Commands::Config { init, show } => {
            handle_config_command(*init, *show, &config, &config_path)?;
        }
    }

    Ok(())
}

async fn run_submit(
    config: &Config,
    args: &ConstraintArgs,
    raw: bool,
    format: OutputFormat,
) -> Result<()> {
    let requests = RequestStore::new();
    let results = ResultStore::new();
    let router = ViewRouter::new();
    mount_dashboard(&requests);

    let scorer = HttpScoringClient::from_config(&config.scoring)?;
    info!(endpoint = scorer.endpoint(), "using scoring endpoint");
    let controller = SubmissionController::new(
        requests.clone(),
        Arc::new(scorer),
        Arc::new(router.clone()),
        config.controller_options(),
    );
    controller.open();
    for (field, value) in args.selections() {
        controller.set_constraint(field, value);
    }

    let mut progress = controller.subscribe();
    let reporter = tokio::spawn(async move {
        let mut last: Option<String> = None;
        while progress.changed().await.is_ok() {
            let message = progress.borrow_and_update().message.clone();
            if let Some(text) = message.as_deref() {
                if last.as_deref() != Some(text) {
                    eprintln!("{text}");
                }
            }
            last = message;
        }
    });
    let outcome = controller.submit().await;
    reporter.abort();
    let ranking = outcome.context("prioritization failed")?;

    if raw {
        println!("{}", render_ranking(&ranking, format)?);
        return Ok(());
    }
    if router.current() != View::Results {
        warn!("submission finished without reaching the results view");
    }
    mount_results(&requests, &results);
    print_results(&results, 1, format)
}

fn print_results(results: &ResultStore, select: usize, format: OutputFormat) -> Result<()> {
    let features = results.prioritized_features();
    let selected = select
        .checked_sub(1)
        .and_then(|index| features.get(index))
        .cloned()
        .ok_or_else(|| anyhow!("no result #{select}; expected 1..={}", features.len()))?;
    results.set_selected_prioritized_feature(Some(selected));
    println!(
        "{}",
        render_results(
            &features,
            results.selected_prioritized_feature().as_ref(),
            format
        )?
    );
    Ok(())
}

fn handle_config_command(init: bool, show: bool, config: &Config, config_path: &Path) -> Result<()> {
    if init {
        Config::write_template(config_path)?;
        println!("Wrote config template to {}", config_path.display());
    }
    if show || !init {
        println!("{}", render_json(config)?);
    }
    Ok(())
}

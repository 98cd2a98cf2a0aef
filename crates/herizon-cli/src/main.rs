//! herizon: command line front end for the Herizon tracking SDK
//!
//! Fetches the dashboard snapshot, logs water, sends SOS alerts and submits
//! intake drafts on behalf of one user.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use herizon_sdk::{
    AlertBroadcaster, Dashboard, FallbackCascade, IdentityProvider, IntakeWizard, SdkConfig,
    StaticIdentity, SubmissionClient, TrackingRecordClient, WizardDraft,
};

#[derive(Parser)]
#[command(name = "herizon")]
#[command(about = "Cycle tracking client for the Herizon service")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, env = "HERIZON_CONFIG", default_value = "herizon.toml")]
    config: PathBuf,

    /// Primary server URL (overrides config file)
    #[arg(long, env = "HERIZON_SERVER_URL")]
    server_url: Option<String>,

    /// Service user id
    #[arg(long, env = "HERIZON_USER_ID")]
    user_id: Option<String>,

    /// Bearer token for the user
    #[arg(long, env = "HERIZON_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Full name used in SOS alerts
    #[arg(long, env = "HERIZON_USER_NAME")]
    user_name: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "HERIZON_LOG_LEVEL", default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch the record and print cycle insights
    Dashboard {
        /// Print the raw record as JSON
        #[arg(long)]
        json: bool,
    },

    /// Log one glass of water
    Water,

    /// Send an SOS alert to every configured relay
    Sos,

    /// Submit an intake draft
    Submit {
        /// TOML file with the draft fields
        draft: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("herizon={},info", cli.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = SdkConfig::load(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    if let Some(url) = cli.server_url.clone() {
        config.endpoints.server_url = url;
    }

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        std::process::exit(1);
    }

    let identity: Arc<dyn IdentityProvider> = match (cli.user_id.clone(), cli.token.clone()) {
        (Some(user_id), Some(token)) => {
            let mut identity = StaticIdentity::signed_in(user_id, token);
            if let Some(name) = cli.user_name.clone() {
                identity = identity.with_display_name(name);
            }
            Arc::new(identity)
        }
        _ => Arc::new(StaticIdentity::signed_out()),
    };

    match cli.command {
        Commands::Dashboard { json } => run_dashboard(&config, identity, json).await,
        Commands::Water => run_water(&config, identity).await,
        Commands::Sos => run_sos(&config, identity.as_ref()).await,
        Commands::Submit { draft } => run_submit(&config, identity.as_ref(), &draft).await,
    }
}

fn dashboard(
    config: &SdkConfig,
    identity: Arc<dyn IdentityProvider>,
) -> anyhow::Result<Dashboard<TrackingRecordClient>> {
    let cascade = FallbackCascade::new(TrackingRecordClient::new()?, config.endpoint_registry()?);
    Ok(Dashboard::new(cascade, identity, config.water.daily_goal))
}

async fn run_dashboard(
    config: &SdkConfig,
    identity: Arc<dyn IdentityProvider>,
    json: bool,
) -> anyhow::Result<()> {
    let mut dash = dashboard(config, identity)?;
    let snapshot = dash.refresh().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot.record)?);
        return Ok(());
    }

    if let Some(advisory) = &snapshot.advisory {
        println!("! {}", advisory);
    }
    if snapshot.intake_required {
        println!("No tracking record found. Run `herizon submit <draft.toml>` to create one.");
    }
    println!("Source:          {:?}", snapshot.source);
    println!("Phase:           {}", snapshot.record.current_phase);
    println!(
        "Next period:     {}",
        snapshot.record.next_period_predicted.format("%Y-%m-%d")
    );

    if let Some(insights) = dash.insights(Utc::now())? {
        println!(
            "Cycle day:       {} of {} ({:.0}%)",
            insights.cycle_day,
            insights.cycle_duration_days,
            insights.cycle_progress() * 100.0
        );
        println!("Days to period:  {}", insights.days_until_next_period);
        println!("Fertile window:  {}", insights.fertility_status());
        println!("PMS likelihood:  {}", insights.pms_likelihood());
        println!("Rest:            {}", insights.rest_status());
    }

    let water = dash.water();
    println!("Water:           {}/{} glasses", water.count(), water.goal());

    println!();
    println!("Daily tips:");
    for tip in dash.daily_tips() {
        println!("  - {}", tip);
    }

    println!();
    println!("Myth busters:");
    for entry in dash.myths() {
        println!("  Myth: {}", entry.myth);
        println!("  Fact: {}", entry.fact);
    }
    Ok(())
}

async fn run_water(config: &SdkConfig, identity: Arc<dyn IdentityProvider>) -> anyhow::Result<()> {
    let mut dash = dashboard(config, identity)?;
    dash.refresh().await?;

    if dash.water().is_goal_reached() {
        println!("Daily goal of {} glasses already reached", dash.water().goal());
        return Ok(());
    }

    let client = TrackingRecordClient::new()?;
    let count = dash.log_water(&client, &config.water_endpoint()).await?;
    println!("Water: {}/{} glasses", count, dash.water().goal());
    Ok(())
}

async fn run_sos(config: &SdkConfig, identity: &dyn IdentityProvider) -> anyhow::Result<()> {
    let broadcaster = AlertBroadcaster::new(
        config.alerts.relay_urls.clone(),
        config.alerts.app_name.clone(),
        config.alert_timeout(),
    )?;

    let name = identity.display_name();
    broadcaster.send_sos(name.as_deref()).await?;
    println!("SOS alert sent to {} contacts", broadcaster.relay_urls().len());
    Ok(())
}

async fn run_submit(
    config: &SdkConfig,
    identity: &dyn IdentityProvider,
    path: &Path,
) -> anyhow::Result<()> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("reading draft {}", path.display()))?;
    let draft: WizardDraft = toml::from_str(&contents)
        .with_context(|| format!("parsing draft {}", path.display()))?;

    let mut wizard = IntakeWizard::from_draft(draft, Utc::now().date_naive())?;
    while wizard.can_go_next() {
        wizard.next();
    }

    let missing = wizard.draft().missing_fields();
    if !missing.is_empty() {
        info!(missing = ?missing, "Submitting draft with empty fields");
    }

    let sink = SubmissionClient::new(config.submission_endpoint())?;
    let completion = wizard.submit(&sink, identity).await?;

    println!("Tracker data submitted (HTTP {})", completion.receipt.status);
    println!();
    println!("Health tips:");
    for tip in &completion.tips {
        println!("  - {}", tip);
    }
    Ok(())
}

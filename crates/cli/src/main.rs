use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sme_insights_core::analytics;
use sme_insights_core::config::Settings;
use sme_insights_core::ingest::file::JsonFileSource;
use sme_insights_core::ingest::provider::{HttpPortalClient, PortalDataSource};
use sme_insights_core::time::reporting::resolve_as_of_date;

#[derive(Debug, Parser)]
#[command(name = "sme_insights", about = "Compute investor dashboard analytics")]
struct Args {
    /// JSON export of SME companies. When omitted, companies are fetched from
    /// PORTAL_API_BASE_URL.
    #[arg(long)]
    companies: Option<PathBuf>,

    /// JSON export of the investor profile (only used with --companies).
    #[arg(long, requires = "companies")]
    profile: Option<PathBuf>,

    /// Investor whose profile is fetched from the portal API.
    #[arg(long)]
    user_id: Option<String>,

    /// As-of date (YYYY-MM-DD). Defaults to today in the reporting timezone.
    #[arg(long)]
    as_of_date: Option<String>,

    /// Print single-line JSON instead of pretty output.
    #[arg(long)]
    compact: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();

    match run(&args, &settings).await {
        Ok(out) => {
            println!("{out}");
            Ok(())
        }
        Err(err) => {
            sentry_anyhow::capture_anyhow(&err);
            tracing::error!(error = %err, "analytics run failed");
            Err(err)
        }
    }
}

async fn run(args: &Args, settings: &Settings) -> anyhow::Result<String> {
    let as_of_date = resolve_as_of_date(
        args.as_of_date.as_deref(),
        chrono::Utc::now(),
        settings.reporting_utc_offset_secs,
    )?;

    let (source, user_id): (Box<dyn PortalDataSource>, String) = match &args.companies {
        Some(path) => (
            Box::new(JsonFileSource::new(path, args.profile.clone())),
            args.user_id.clone().unwrap_or_else(|| "local".to_string()),
        ),
        None => {
            let user_id = args
                .user_id
                .clone()
                .context("--user-id is required when fetching from the portal API")?;
            (Box::new(HttpPortalClient::from_settings(settings)?), user_id)
        }
    };

    let companies = source.list_sme_companies().await?;
    let profile = source.get_investor_profile(&user_id).await?;

    let result = analytics::analyze(&companies, profile.as_ref(), as_of_date);

    tracing::info!(
        %as_of_date,
        source = source.source_name(),
        %user_id,
        companies = result.metrics.total_companies,
        active = result.metrics.active_companies,
        investment_capacity = result.investment_capacity,
        "computed investor analytics"
    );

    let out = if args.compact {
        serde_json::to_string(&result)?
    } else {
        serde_json::to_string_pretty(&result)?
    };
    Ok(out)
}

fn init_sentry(settings: &Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sme_insights_core::analytics;
use sme_insights_core::domain::analytics::InvestorAnalytics;
use sme_insights_core::ingest::provider::{HttpPortalClient, PortalDataSource};
use sme_insights_core::time::reporting::resolve_as_of_date;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = sme_insights_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    let source: Option<Arc<dyn PortalDataSource>> = match HttpPortalClient::from_settings(&settings) {
        Ok(client) => Some(Arc::new(client)),
        Err(e) => {
            sentry_anyhow::capture_anyhow(&e);
            tracing::error!(error = %e, "portal API not configured; starting API in degraded mode");
            None
        }
    };

    let state = AppState {
        source,
        reporting_utc_offset_secs: settings.reporting_utc_offset_secs,
    };

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3000);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));

    tracing::info!(%addr, "api listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/investors/:user_id/analytics", get(get_investor_analytics))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn healthz() -> &'static str {
    "ok"
}

#[derive(Clone)]
struct AppState {
    source: Option<Arc<dyn PortalDataSource>>,
    reporting_utc_offset_secs: i32,
}

#[derive(Debug, Default, Deserialize)]
struct AnalyticsQuery {
    as_of_date: Option<String>,
}

async fn get_investor_analytics(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(query): Query<AnalyticsQuery>,
) -> Result<Json<InvestorAnalytics>, StatusCode> {
    let Some(source) = &state.source else {
        return Err(StatusCode::SERVICE_UNAVAILABLE);
    };

    let as_of_date = resolve_as_of_date(
        query.as_of_date.as_deref(),
        Utc::now(),
        state.reporting_utc_offset_secs,
    )
    .map_err(|_| StatusCode::BAD_REQUEST)?;

    let analytics = load_and_analyze(source.as_ref(), &user_id, as_of_date)
        .await
        .map_err(|e| {
            sentry_anyhow::capture_anyhow(&e);
            tracing::error!(%user_id, source = source.source_name(), error = %e, "analytics inputs unavailable");
            StatusCode::BAD_GATEWAY
        })?;

    Ok(Json(analytics))
}

async fn load_and_analyze(
    source: &dyn PortalDataSource,
    user_id: &str,
    as_of_date: NaiveDate,
) -> anyhow::Result<InvestorAnalytics> {
    let (companies, profile) = tokio::try_join!(
        source.list_sme_companies(),
        source.get_investor_profile(user_id),
    )?;

    Ok(analytics::analyze(&companies, profile.as_ref(), as_of_date))
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

fn init_sentry(settings: &sme_insights_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}

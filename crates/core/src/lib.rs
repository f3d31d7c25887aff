pub mod analytics;
pub mod domain;
pub mod ingest;
pub mod time;

pub mod config {
    use anyhow::Context;

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub portal_api_base_url: Option<String>,
        pub portal_api_token: Option<String>,
        pub sentry_dsn: Option<String>,
        // Seconds east of UTC; decides which date is "today".
        pub reporting_utc_offset_secs: i32,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            let reporting_utc_offset_secs = match std::env::var("ANALYTICS_UTC_OFFSET_SECS") {
                Ok(s) => s
                    .trim()
                    .parse::<i32>()
                    .with_context(|| format!("ANALYTICS_UTC_OFFSET_SECS is not an integer: {s:?}"))?,
                Err(_) => 0,
            };

            Ok(Self {
                portal_api_base_url: std::env::var("PORTAL_API_BASE_URL").ok(),
                portal_api_token: std::env::var("PORTAL_API_TOKEN").ok(),
                sentry_dsn: std::env::var("SENTRY_DSN").ok(),
                reporting_utc_offset_secs,
            })
        }

        pub fn require_portal_api_base_url(&self) -> anyhow::Result<&str> {
            self.portal_api_base_url
                .as_deref()
                .filter(|s| !s.trim().is_empty())
                .context("PORTAL_API_BASE_URL is required")
        }
    }
}

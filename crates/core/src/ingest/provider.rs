use crate::config::Settings;
use crate::domain::company::{CompanyRecord, InvestorProfile};
use crate::domain::contract::{companies_from_value, profile_from_value};
use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MAX_ATTEMPTS: u32 = 3;
const DEFAULT_COMPANIES_PATH: &str = "/sme-companies";
const DEFAULT_PROFILE_PATH: &str = "/investor-profiles/{user_id}";

#[async_trait::async_trait]
pub trait PortalDataSource: Send + Sync {
    fn source_name(&self) -> &'static str;

    async fn list_sme_companies(&self) -> Result<Vec<CompanyRecord>>;

    async fn get_investor_profile(&self, user_id: &str) -> Result<Option<InvestorProfile>>;
}

#[derive(Debug, Clone)]
pub struct HttpOptions {
    pub timeout: Duration,
    pub max_attempts: u32,
    pub companies_path: String,
    pub profile_path: String,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            companies_path: DEFAULT_COMPANIES_PATH.to_string(),
            profile_path: DEFAULT_PROFILE_PATH.to_string(),
        }
    }
}

impl HttpOptions {
    pub fn from_env() -> Self {
        let mut out = Self::default();

        if let Some(n) = env_parse::<u64>("PORTAL_API_TIMEOUT_SECS") {
            out.timeout = Duration::from_secs(n);
        }
        if let Some(n) = env_parse::<u32>("PORTAL_API_MAX_ATTEMPTS") {
            out.max_attempts = n;
        }
        if let Some(p) = env_non_empty("PORTAL_API_COMPANIES_PATH") {
            out.companies_path = p;
        }
        if let Some(p) = env_non_empty("PORTAL_API_PROFILE_PATH") {
            out.profile_path = p;
        }

        out
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|s| s.trim().parse().ok())
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|s| !s.trim().is_empty())
}

#[derive(Debug, Clone)]
pub struct HttpPortalClient {
    http: reqwest::Client,
    base_url: String,
    api_token: Option<String>,
    opts: HttpOptions,
}

enum Outcome {
    Json(Value),
    NotFound,
    Retryable(anyhow::Error),
}

impl HttpPortalClient {
    pub fn new(base_url: &str, api_token: Option<String>, opts: HttpOptions) -> Result<Self> {
        anyhow::ensure!(!base_url.trim().is_empty(), "portal API base URL must be non-empty");

        let http = reqwest::Client::builder()
            .timeout(opts.timeout)
            .build()
            .context("failed to build portal API http client")?;

        Ok(Self {
            http,
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            api_token: api_token.filter(|t| !t.trim().is_empty()),
            opts,
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let base_url = settings.require_portal_api_base_url()?;
        Self::new(
            base_url,
            settings.portal_api_token.clone(),
            HttpOptions::from_env(),
        )
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    fn profile_url(&self, user_id: &str) -> Result<String> {
        anyhow::ensure!(
            !user_id.is_empty()
                && user_id
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'),
            "invalid user id: {user_id:?}"
        );
        Ok(self.url(&self.opts.profile_path.replace("{user_id}", user_id)))
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        if let Some(token) = &self.api_token {
            headers.insert(AUTHORIZATION, HeaderValue::from_str(&format!("Bearer {token}"))?);
        }
        Ok(headers)
    }

    async fn get_once(&self, url: &str) -> Result<Outcome> {
        let res = match self.http.get(url).headers(self.headers()?).send().await {
            Ok(res) => res,
            Err(err) => {
                return Ok(Outcome::Retryable(
                    anyhow::Error::new(err).context("portal API request failed"),
                ))
            }
        };

        let status = res.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(Outcome::NotFound);
        }

        let text = match res.text().await {
            Ok(text) => text,
            Err(err) => {
                return Ok(Outcome::Retryable(
                    anyhow::Error::new(err).context("failed to read portal API response"),
                ))
            }
        };

        if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
            return Ok(Outcome::Retryable(anyhow::anyhow!(
                "portal API HTTP {status}: {text}"
            )));
        }
        anyhow::ensure!(status.is_success(), "portal API HTTP {status}: {text}");

        let json = serde_json::from_str::<Value>(&text)
            .with_context(|| format!("portal API response is not valid JSON: {text}"))?;
        Ok(Outcome::Json(json))
    }

    // Retries transport errors, 429 and 5xx; 404 maps to `None`.
    async fn get_json(&self, url: &str) -> Result<Option<Value>> {
        let max_attempts = self.opts.max_attempts.max(1);
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            match self.get_once(url).await? {
                Outcome::Json(v) => return Ok(Some(v)),
                Outcome::NotFound => return Ok(None),
                Outcome::Retryable(err) => {
                    if attempt >= max_attempts {
                        return Err(err);
                    }
                    let backoff = Duration::from_secs(1 << (attempt - 1));
                    tracing::warn!(%url, attempt, ?backoff, error = %err, "portal API fetch failed; retrying");
                    tokio::time::sleep(backoff).await;
                }
            }
        }
    }
}

#[async_trait::async_trait]
impl PortalDataSource for HttpPortalClient {
    fn source_name(&self) -> &'static str {
        "portal_http_api"
    }

    async fn list_sme_companies(&self) -> Result<Vec<CompanyRecord>> {
        let url = self.url(&self.opts.companies_path);
        let value = self
            .get_json(&url)
            .await?
            .with_context(|| format!("companies endpoint not found: {url}"))?;
        let companies = companies_from_value(value)?;
        tracing::info!(count = companies.len(), "fetched SME companies");
        Ok(companies)
    }

    async fn get_investor_profile(&self, user_id: &str) -> Result<Option<InvestorProfile>> {
        let url = self.profile_url(user_id)?;
        match self.get_json(&url).await? {
            Some(value) => profile_from_value(value),
            None => {
                tracing::info!(%user_id, "investor profile not found");
                Ok(None)
            }
        }
    }
}

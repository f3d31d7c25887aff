use crate::domain::company::{CompanyRecord, InvestorProfile};
use crate::domain::contract::{parse_companies, parse_profile};
use crate::ingest::provider::PortalDataSource;
use anyhow::{Context, Result};
use std::path::PathBuf;

// The profile file, when given, is returned for every user id.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    companies_path: PathBuf,
    profile_path: Option<PathBuf>,
}

impl JsonFileSource {
    pub fn new(companies_path: impl Into<PathBuf>, profile_path: Option<PathBuf>) -> Self {
        Self {
            companies_path: companies_path.into(),
            profile_path,
        }
    }
}

#[async_trait::async_trait]
impl PortalDataSource for JsonFileSource {
    fn source_name(&self) -> &'static str {
        "json_file"
    }

    async fn list_sme_companies(&self) -> Result<Vec<CompanyRecord>> {
        let text = tokio::fs::read_to_string(&self.companies_path)
            .await
            .with_context(|| format!("failed to read {}", self.companies_path.display()))?;
        parse_companies(&text)
            .with_context(|| format!("failed to parse {}", self.companies_path.display()))
    }

    async fn get_investor_profile(&self, user_id: &str) -> Result<Option<InvestorProfile>> {
        let Some(path) = &self.profile_path else {
            tracing::debug!(%user_id, "no profile file configured");
            return Ok(None);
        };

        let text = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?;
        parse_profile(&text).with_context(|| format!("failed to parse {}", path.display()))
    }
}

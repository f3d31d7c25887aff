use crate::domain::company::{CompanyRecord, CompanyStatus, FinanceRange, InvestorProfile};
use crate::time::reporting::parse_timestamp;
use anyhow::{bail, Context};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiCompanyRecord {
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub business_name: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub commencement_date: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiInvestorProfile {
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub finance_range: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl ApiCompanyRecord {
    pub fn into_record(self) -> CompanyRecord {
        let id = match self.id {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            _ => String::new(),
        };

        let commencement_date = parse_field(&id, "commencement_date", self.commencement_date)
            .map(|dt| dt.date_naive());
        let created_at = parse_field(&id, "created_at", self.created_at);

        CompanyRecord {
            business_name: self.business_name.unwrap_or_default(),
            industry: self.industry.filter(|s| !s.is_empty()),
            status: self
                .status
                .filter(|s| !s.is_empty())
                .map(|s| CompanyStatus::from_tag(&s)),
            commencement_date,
            created_at,
            id,
        }
    }
}

impl ApiInvestorProfile {
    pub fn into_profile(self) -> InvestorProfile {
        let finance_range = self.finance_range.and_then(|tag| {
            let range = FinanceRange::from_tag(&tag);
            if range.is_none() && !tag.is_empty() {
                tracing::debug!(finance_range = %tag, "unrecognized finance range; treating as unset");
            }
            range
        });

        InvestorProfile {
            industry: self.industry.filter(|s| !s.is_empty()),
            finance_range,
            created_at: parse_field("profile", "created_at", self.created_at),
        }
    }
}

fn parse_field(id: &str, field: &'static str, raw: Option<String>) -> Option<DateTime<Utc>> {
    let raw = raw?;
    let parsed = parse_timestamp(&raw);
    if parsed.is_none() && !raw.trim().is_empty() {
        tracing::debug!(%id, field, value = %raw, "unparseable timestamp; treating as unset");
    }
    parsed
}

// Bare array, or an envelope keyed by `data` or `companies`.
pub fn parse_companies(text: &str) -> anyhow::Result<Vec<CompanyRecord>> {
    let value = serde_json::from_str::<Value>(text)
        .context("companies payload is not valid JSON")?;
    companies_from_value(value)
}

pub fn companies_from_value(value: Value) -> anyhow::Result<Vec<CompanyRecord>> {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut obj) => match obj.remove("data").or_else(|| obj.remove("companies")) {
            Some(Value::Array(items)) => items,
            _ => bail!("companies payload object has no `data` or `companies` array"),
        },
        other => bail!("companies payload must be an array (got {})", json_kind(&other)),
    };

    let mut out = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        if !item.is_object() {
            tracing::warn!(index, kind = json_kind(&item), "skipping non-object company entry");
            continue;
        }
        let raw = serde_json::from_value::<ApiCompanyRecord>(item)
            .with_context(|| format!("company entry {index} has an invalid shape"))?;
        out.push(raw.into_record());
    }

    Ok(out)
}

// `null` means the investor has no profile yet.
pub fn parse_profile(text: &str) -> anyhow::Result<Option<InvestorProfile>> {
    let value = serde_json::from_str::<Value>(text)
        .context("investor profile payload is not valid JSON")?;
    profile_from_value(value)
}

pub fn profile_from_value(value: Value) -> anyhow::Result<Option<InvestorProfile>> {
    let value = match value {
        Value::Object(mut obj) if obj.len() == 1 && obj.contains_key("data") => {
            obj.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    };

    match value {
        Value::Null => Ok(None),
        Value::Object(_) => {
            let raw = serde_json::from_value::<ApiInvestorProfile>(value)
                .context("investor profile has an invalid shape")?;
            Ok(Some(raw.into_profile()))
        }
        other => bail!("investor profile must be an object (got {})", json_kind(&other)),
    }
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

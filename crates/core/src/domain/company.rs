use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const UNKNOWN_STATUS: &str = "unknown";
pub const NOT_SPECIFIED: &str = "Not specified";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyRecord {
    pub id: String,
    pub business_name: String,
    pub industry: Option<String>,
    pub status: Option<CompanyStatus>,
    pub commencement_date: Option<NaiveDate>,
    pub created_at: Option<DateTime<Utc>>,
}

impl CompanyRecord {
    pub fn industry(&self) -> Option<&str> {
        self.industry.as_deref().filter(|s| !s.is_empty())
    }

    pub fn status_label(&self) -> &str {
        self.status
            .as_ref()
            .map(CompanyStatus::as_str)
            .filter(|s| !s.is_empty())
            .unwrap_or(UNKNOWN_STATUS)
    }

    pub fn is_active(&self) -> bool {
        matches!(self.status, Some(CompanyStatus::Active))
    }

    pub fn is_approved(&self) -> bool {
        matches!(self.status, Some(CompanyStatus::Approved))
    }
}

// Tags match exactly (case-sensitive); anything else is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CompanyStatus {
    Active,
    Approved,
    Pending,
    Rejected,
    Other(String),
}

impl CompanyStatus {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "active" => Self::Active,
            "approved" => Self::Approved,
            "pending" => Self::Pending,
            "rejected" => Self::Rejected,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Active => "active",
            Self::Approved => "approved",
            Self::Pending => "pending",
            Self::Rejected => "rejected",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for CompanyStatus {
    fn from(s: String) -> Self {
        Self::from_tag(&s)
    }
}

impl From<CompanyStatus> for String {
    fn from(s: CompanyStatus) -> Self {
        s.as_str().to_string()
    }
}

impl fmt::Display for CompanyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvestorProfile {
    pub industry: Option<String>,
    pub finance_range: Option<FinanceRange>,
    pub created_at: Option<DateTime<Utc>>,
}

impl InvestorProfile {
    pub fn industry(&self) -> Option<&str> {
        self.industry.as_deref().filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FinanceRange {
    #[serde(rename = "under_100k")]
    Under100k,
    #[serde(rename = "100k_500k")]
    From100kTo500k,
    #[serde(rename = "500k_1m")]
    From500kTo1m,
    #[serde(rename = "1m_5m")]
    From1mTo5m,
    #[serde(rename = "5m_10m")]
    From5mTo10m,
    #[serde(rename = "over_10m")]
    Over10m,
}

impl FinanceRange {
    pub const ALL: [FinanceRange; 6] = [
        Self::Under100k,
        Self::From100kTo500k,
        Self::From500kTo1m,
        Self::From1mTo5m,
        Self::From5mTo10m,
        Self::Over10m,
    ];

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.tag() == tag)
    }

    pub fn tag(self) -> &'static str {
        match self {
            Self::Under100k => "under_100k",
            Self::From100kTo500k => "100k_500k",
            Self::From500kTo1m => "500k_1m",
            Self::From1mTo5m => "1m_5m",
            Self::From5mTo10m => "5m_10m",
            Self::Over10m => "over_10m",
        }
    }

    pub fn midpoint(self) -> u64 {
        match self {
            Self::Under100k => 50_000,
            Self::From100kTo500k => 300_000,
            Self::From500kTo1m => 750_000,
            Self::From1mTo5m => 3_000_000,
            Self::From5mTo10m => 7_500_000,
            Self::Over10m => 15_000_000,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Under100k => "Under 100K",
            Self::From100kTo500k => "100K - 500K",
            Self::From500kTo1m => "500K - 1M",
            Self::From1mTo5m => "1M - 5M",
            Self::From5mTo10m => "5M - 10M",
            Self::Over10m => "Over 10M",
        }
    }
}

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestorAnalytics {
    pub metrics: PortfolioMetrics,
    pub industry_distribution: Vec<DistributionRow>,
    pub status_distribution: Vec<DistributionRow>,
    pub company_timeline: Vec<TimelinePoint>,
    pub opportunity_analysis: Vec<OpportunityEntry>,
    pub monthly_analysis: Vec<MonthlyPoint>,
    pub investment_capacity: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioMetrics {
    pub total_companies: usize,
    pub active_companies: usize,
    pub industries: usize,
    pub member_since_year: i32,
    pub preferred_industry: String,
    pub finance_range: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionRow {
    pub name: String,
    pub value: usize,
    pub percentage: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelinePoint {
    pub year: String,
    pub companies: usize,
    pub cumulative: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpportunityEntry {
    pub company: String,
    pub industry: String,
    pub score: u32,
    pub age: i32,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyPoint {
    pub month: String,
    #[serde(rename = "totalSMEs")]
    pub total_smes: usize,
    #[serde(rename = "activeSMEs")]
    pub active_smes: usize,
    pub opportunities: usize,
    #[serde(rename = "newAdditions")]
    pub new_additions: usize,
}

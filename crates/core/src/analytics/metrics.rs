use crate::domain::analytics::PortfolioMetrics;
use crate::domain::company::{CompanyRecord, FinanceRange, InvestorProfile, NOT_SPECIFIED};
use chrono::{Datelike, NaiveDate};
use std::collections::HashSet;

pub fn summarize(
    companies: &[CompanyRecord],
    profile: Option<&InvestorProfile>,
    as_of_date: NaiveDate,
) -> PortfolioMetrics {
    let industries: HashSet<&str> = companies.iter().filter_map(CompanyRecord::industry).collect();

    PortfolioMetrics {
        total_companies: companies.len(),
        active_companies: companies.iter().filter(|c| c.is_active()).count(),
        industries: industries.len(),
        member_since_year: profile
            .and_then(|p| p.created_at)
            .map(|created_at| created_at.year())
            .unwrap_or_else(|| as_of_date.year()),
        preferred_industry: profile
            .and_then(InvestorProfile::industry)
            .unwrap_or(NOT_SPECIFIED)
            .to_string(),
        finance_range: finance_range(profile)
            .map(FinanceRange::label)
            .unwrap_or(NOT_SPECIFIED)
            .to_string(),
    }
}

pub fn investment_capacity(profile: Option<&InvestorProfile>) -> u64 {
    finance_range(profile).map(FinanceRange::midpoint).unwrap_or(0)
}

fn finance_range(profile: Option<&InvestorProfile>) -> Option<FinanceRange> {
    profile.and_then(|p| p.finance_range)
}

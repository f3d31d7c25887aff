use crate::domain::analytics::DistributionRow;
use crate::domain::company::{CompanyRecord, CompanyStatus, UNKNOWN_STATUS};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissPolicy {
    Skip,
    Coerce(&'static str),
}

pub fn distribute<'a, F>(companies: &'a [CompanyRecord], label: F, miss: MissPolicy) -> Vec<DistributionRow>
where
    F: Fn(&'a CompanyRecord) -> Option<&'a str>,
{
    // Skipped records still count in the denominator.
    let total = companies.len();
    if total == 0 {
        return Vec::new();
    }

    let mut order: Vec<&'a str> = Vec::new();
    let mut counts: HashMap<&'a str, usize> = HashMap::new();
    for company in companies {
        let key = match (label(company).filter(|s| !s.is_empty()), miss) {
            (Some(key), _) => key,
            (None, MissPolicy::Skip) => continue,
            (None, MissPolicy::Coerce(fallback)) => fallback,
        };

        let count = counts.entry(key).or_insert_with(|| {
            order.push(key);
            0
        });
        *count += 1;
    }

    order
        .into_iter()
        .map(|name| {
            let value = counts[name];
            DistributionRow {
                name: name.to_string(),
                value,
                percentage: format_percentage(value, total),
            }
        })
        .collect()
}

pub fn industry_distribution(companies: &[CompanyRecord]) -> Vec<DistributionRow> {
    distribute(companies, CompanyRecord::industry, MissPolicy::Skip)
}

pub fn status_distribution(companies: &[CompanyRecord]) -> Vec<DistributionRow> {
    distribute(
        companies,
        |c| c.status.as_ref().map(CompanyStatus::as_str),
        MissPolicy::Coerce(UNKNOWN_STATUS),
    )
}

// Tenths of a percent, rounding exact halves up.
fn format_percentage(value: usize, total: usize) -> String {
    let tenths = (value * 2000 + total) / (2 * total);
    format!("{}.{}", tenths / 10, tenths % 10)
}

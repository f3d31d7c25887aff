use crate::domain::analytics::MonthlyPoint;
use crate::domain::company::CompanyRecord;
use chrono::{Datelike, NaiveDate};

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Debug, Clone, Copy, Default)]
struct MonthBucket {
    added: usize,
    added_active: usize,
    added_approved: usize,
}

pub fn monthly_analysis(companies: &[CompanyRecord], as_of_date: NaiveDate) -> Vec<MonthlyPoint> {
    let current_year = as_of_date.year();
    let current_month = as_of_date.month0() as usize;

    let mut buckets = vec![MonthBucket::default(); current_month + 1];
    for company in companies {
        let Some(created_at) = company.created_at else {
            continue;
        };
        if created_at.year() != current_year {
            continue;
        }
        let Some(bucket) = buckets.get_mut(created_at.month0() as usize) else {
            continue;
        };

        bucket.added += 1;
        if company.is_active() {
            bucket.added_active += 1;
        }
        if company.is_approved() {
            bucket.added_approved += 1;
        }
    }

    let mut total = 0;
    let mut active = 0;
    let mut approved = 0;
    buckets
        .into_iter()
        .zip(MONTH_LABELS)
        .map(|(bucket, label)| {
            total += bucket.added;
            active += bucket.added_active;
            approved += bucket.added_approved;
            MonthlyPoint {
                month: label.to_string(),
                total_smes: total,
                active_smes: active,
                // Approved companies created so far on top of the active total.
                opportunities: active + approved,
                new_additions: bucket.added,
            }
        })
        .collect()
}

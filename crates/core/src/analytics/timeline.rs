use crate::domain::analytics::TimelinePoint;
use crate::domain::company::CompanyRecord;
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

pub const TIMELINE_WINDOW_YEARS: i32 = 10;

// Out-of-window years are left out of the running total too.
pub fn company_timeline(companies: &[CompanyRecord], as_of_date: NaiveDate) -> Vec<TimelinePoint> {
    let current_year = as_of_date.year();
    let window = (current_year - TIMELINE_WINDOW_YEARS)..=current_year;

    let mut per_year: BTreeMap<i32, usize> = BTreeMap::new();
    for founded in companies.iter().filter_map(|c| c.commencement_date) {
        let year = founded.year();
        if window.contains(&year) {
            *per_year.entry(year).or_default() += 1;
        }
    }

    let mut cumulative = 0;
    per_year
        .into_iter()
        .map(|(year, companies)| {
            cumulative += companies;
            TimelinePoint {
                year: year.to_string(),
                companies,
                cumulative,
            }
        })
        .collect()
}

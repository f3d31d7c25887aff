pub mod distribution;
pub mod metrics;
pub mod monthly;
pub mod opportunity;
pub mod timeline;

use crate::domain::analytics::InvestorAnalytics;
use crate::domain::company::{CompanyRecord, InvestorProfile};
use chrono::NaiveDate;

pub fn analyze(
    companies: &[CompanyRecord],
    profile: Option<&InvestorProfile>,
    as_of_date: NaiveDate,
) -> InvestorAnalytics {
    let analytics = InvestorAnalytics {
        metrics: metrics::summarize(companies, profile, as_of_date),
        industry_distribution: distribution::industry_distribution(companies),
        status_distribution: distribution::status_distribution(companies),
        company_timeline: timeline::company_timeline(companies, as_of_date),
        opportunity_analysis: opportunity::opportunity_analysis(companies, profile, as_of_date),
        monthly_analysis: monthly::monthly_analysis(companies, as_of_date),
        investment_capacity: metrics::investment_capacity(profile),
    };

    tracing::debug!(
        %as_of_date,
        companies = companies.len(),
        has_profile = profile.is_some(),
        industries = analytics.industry_distribution.len(),
        timeline_years = analytics.company_timeline.len(),
        "computed investor analytics"
    );

    analytics
}


#[cfg(test)]
mod tests {
    use super::fixtures::{company, date, profile};
    use super::*;
    use crate::domain::company::FinanceRange;

    #[test]
    fn empty_company_list_yields_empty_views() {
        let p = profile(Some("Fintech"), Some(FinanceRange::Over10m));
        let a = analyze(&[], Some(&p), date(2024, 7, 10));

        assert_eq!(a.metrics.total_companies, 0);
        assert_eq!(a.metrics.active_companies, 0);
        assert_eq!(a.metrics.industries, 0);
        assert!(a.industry_distribution.is_empty());
        assert!(a.status_distribution.is_empty());
        assert!(a.company_timeline.is_empty());
        assert!(a.opportunity_analysis.is_empty());
        assert_eq!(a.monthly_analysis.len(), 7);
        assert!(a
            .monthly_analysis
            .iter()
            .all(|m| m.total_smes == 0 && m.active_smes == 0 && m.opportunities == 0 && m.new_additions == 0));
        assert_eq!(a.investment_capacity, 15_000_000);
    }

    #[test]
    fn single_matching_fintech_company() {
        let companies = vec![company("1")
            .named("Acme Pay")
            .with_industry("Fintech")
            .with_status("active")
            .founded(2015, 1, 1)];
        let p = profile(Some("Fintech"), Some(FinanceRange::From1mTo5m));

        let a = analyze(&companies, Some(&p), date(2024, 9, 1));

        assert_eq!(a.industry_distribution.len(), 1);
        assert_eq!(a.industry_distribution[0].name, "Fintech");
        assert_eq!(a.industry_distribution[0].value, 1);
        assert_eq!(a.industry_distribution[0].percentage, "100.0");
        assert_eq!(a.opportunity_analysis[0].score, 100);
        assert_eq!(a.opportunity_analysis[0].age, 9);
        assert_eq!(a.investment_capacity, 3_000_000);
    }

    #[test]
    fn undated_company_counts_but_is_not_bucketed() {
        let companies = vec![company("1").with_industry("Retail").with_status("active")];

        let a = analyze(&companies, None, date(2024, 3, 1));

        assert!(a.company_timeline.is_empty());
        assert!(a.monthly_analysis.iter().all(|m| m.total_smes == 0));
        assert_eq!(a.metrics.total_companies, 1);
        assert_eq!(a.metrics.active_companies, 1);
        assert_eq!(a.opportunity_analysis[0].age, 0);
        assert_eq!(a.investment_capacity, 0);
    }

    #[test]
    fn opportunities_cover_first_ten_in_input_order() {
        let companies: Vec<_> = (0..11)
            .map(|i| {
                let c = company(&i.to_string()).with_industry(&format!("Industry {i}"));
                // Later companies score higher; order must not change.
                if i >= 5 {
                    c.with_status("active").founded(2000, 1, 1)
                } else {
                    c
                }
            })
            .collect();

        let a = analyze(&companies, None, date(2024, 1, 1));

        assert_eq!(a.opportunity_analysis.len(), 10);
        let industries: Vec<_> = a
            .opportunity_analysis
            .iter()
            .map(|e| e.industry.clone())
            .collect();
        let expected: Vec<_> = (0..10).map(|i| format!("Industry {i}")).collect();
        assert_eq!(industries, expected);
    }

    #[test]
    fn timeline_window_excludes_old_companies_from_cumulative() {
        let companies = vec![
            company("old").founded(2009, 6, 1),
            company("recent").founded(2021, 6, 1),
        ];

        let a = analyze(&companies, None, date(2024, 6, 1));

        assert_eq!(a.company_timeline.len(), 1);
        assert_eq!(a.company_timeline[0].year, "2021");
        assert_eq!(a.company_timeline[0].companies, 1);
        assert_eq!(a.company_timeline[0].cumulative, 1);
    }

    #[test]
    fn distribution_and_score_invariants_hold() {
        let statuses = ["active", "approved", "pending", "rejected", ""];
        let companies: Vec<_> = (0..25u32)
            .map(|i| {
                let mut c = company(&i.to_string()).with_status(statuses[(i % 5) as usize]);
                if i % 4 != 0 {
                    c = c.with_industry(["Fintech", "Retail", "Health"][(i % 3) as usize]);
                }
                if i % 2 == 0 {
                    c = c.founded(2010 + (i as i32 % 15), 1, 1);
                }
                c.created(2024, 1 + i % 6, 1)
            })
            .collect();
        let p = profile(Some("Retail"), None);

        let a = analyze(&companies, Some(&p), date(2024, 6, 30));

        let status_sum: usize = a.status_distribution.iter().map(|r| r.value).sum();
        assert_eq!(status_sum, a.metrics.total_companies);
        let industry_sum: usize = a.industry_distribution.iter().map(|r| r.value).sum();
        assert!(industry_sum < a.metrics.total_companies);
        assert!(a
            .opportunity_analysis
            .iter()
            .all(|e| (50..=100).contains(&e.score)));
        assert!(a
            .company_timeline
            .windows(2)
            .all(|w| w[0].cumulative <= w[1].cumulative));
        assert_eq!(a.monthly_analysis.last().unwrap().total_smes, 25);
    }

    #[test]
    fn serializes_with_dashboard_keys() {
        let companies = vec![company("1").with_status("active").created(2024, 1, 5)];
        let a = analyze(&companies, None, date(2024, 1, 31));
        let v = serde_json::to_value(&a).unwrap();

        assert!(v.get("industryDistribution").is_some());
        assert!(v.get("opportunityAnalysis").is_some());
        assert_eq!(v["investmentCapacity"], 0);
        assert_eq!(v["metrics"]["totalCompanies"], 1);
        assert_eq!(v["metrics"]["memberSinceYear"], 2024);
        assert_eq!(v["monthlyAnalysis"][0]["month"], "Jan");
        assert_eq!(v["monthlyAnalysis"][0]["totalSMEs"], 1);
        assert_eq!(v["monthlyAnalysis"][0]["activeSMEs"], 1);
        assert_eq!(v["monthlyAnalysis"][0]["newAdditions"], 1);
    }
}

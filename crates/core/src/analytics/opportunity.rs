use crate::domain::analytics::OpportunityEntry;
use crate::domain::company::{CompanyRecord, InvestorProfile};
use chrono::{Datelike, NaiveDate};

pub const BASE_SCORE: u32 = 50;
pub const MAX_SCORE: u32 = 100;

pub const MAX_ENTRIES: usize = 10;

#[derive(Debug, Clone, Copy)]
pub struct ScoringContext<'a> {
    pub company: &'a CompanyRecord,
    pub profile: Option<&'a InvestorProfile>,
    pub age: i32,
}

#[derive(Clone, Copy)]
pub struct Bonus {
    pub name: &'static str,
    pub points: u32,
    pub applies: fn(&ScoringContext<'_>) -> bool,
}

// The two age tiers are mutually exclusive.
pub static BONUSES: [Bonus; 5] = [
    Bonus {
        name: "established",
        points: 20,
        applies: |ctx| ctx.age >= 5,
    },
    Bonus {
        name: "maturing",
        points: 10,
        applies: |ctx| (2..5).contains(&ctx.age),
    },
    Bonus {
        name: "active",
        points: 20,
        applies: |ctx| ctx.company.is_active(),
    },
    Bonus {
        name: "approved",
        points: 15,
        applies: |ctx| ctx.company.is_approved(),
    },
    Bonus {
        name: "industry_match",
        points: 15,
        applies: |ctx| match (ctx.company.industry(), ctx.profile.and_then(InvestorProfile::industry)) {
            (Some(company), Some(preferred)) => company == preferred,
            _ => false,
        },
    },
];

pub fn company_age(company: &CompanyRecord, as_of_date: NaiveDate) -> i32 {
    company
        .commencement_date
        .map(|d| as_of_date.year() - d.year())
        .unwrap_or(0)
}

pub fn score(ctx: &ScoringContext<'_>) -> u32 {
    BONUSES
        .iter()
        .filter(|bonus| (bonus.applies)(ctx))
        .fold(BASE_SCORE, |acc, bonus| acc + bonus.points)
        .min(MAX_SCORE)
}

pub fn opportunity_analysis(
    companies: &[CompanyRecord],
    profile: Option<&InvestorProfile>,
    as_of_date: NaiveDate,
) -> Vec<OpportunityEntry> {
    companies
        .iter()
        .take(MAX_ENTRIES)
        .map(|company| {
            let age = company_age(company, as_of_date);
            let ctx = ScoringContext {
                company,
                profile,
                age,
            };
            OpportunityEntry {
                company: company.business_name.clone(),
                industry: company.industry().unwrap_or_default().to_string(),
                score: score(&ctx),
                age,
                status: company.status_label().to_string(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::fixtures::{company, date, profile};

    fn bonus(name: &str) -> &'static Bonus {
        BONUSES.iter().find(|b| b.name == name).unwrap()
    }

    #[test]
    fn age_tiers() {
        let as_of = date(2024, 1, 1);
        let cases = [(2024, 0), (2023, 0), (2022, 10), (2020, 10), (2019, 20), (1990, 20)];
        for (founded_year, expected_bonus) in cases {
            let c = company("a").founded(founded_year, 6, 1);
            let ctx = ScoringContext {
                company: &c,
                profile: None,
                age: company_age(&c, as_of),
            };
            assert_eq!(score(&ctx), BASE_SCORE + expected_bonus, "founded {founded_year}");
        }
    }

    #[test]
    fn each_status_bonus_applies_independently() {
        let active = company("a").with_status("active");
        let approved = company("b").with_status("approved");
        let pending = company("c").with_status("pending");
        let ctx = |c| ScoringContext {
            company: c,
            profile: None,
            age: 0,
        };

        assert!((bonus("active").applies)(&ctx(&active)));
        assert!(!(bonus("approved").applies)(&ctx(&active)));
        assert!((bonus("approved").applies)(&ctx(&approved)));
        assert_eq!(score(&ctx(&active)), 70);
        assert_eq!(score(&ctx(&approved)), 65);
        assert_eq!(score(&ctx(&pending)), 50);
    }

    #[test]
    fn industry_match_is_exact_and_needs_both_sides() {
        let c = company("a").with_industry("Fintech");
        let blank = company("b");
        let fintech = profile(Some("Fintech"), None);
        let lower = profile(Some("fintech"), None);
        let none = profile(None, None);
        let is_match = |c, p| {
            (bonus("industry_match").applies)(&ScoringContext {
                company: c,
                profile: p,
                age: 0,
            })
        };

        assert!(is_match(&c, Some(&fintech)));
        assert!(!is_match(&c, Some(&lower)));
        assert!(!is_match(&c, Some(&none)));
        assert!(!is_match(&c, None));
        assert!(!is_match(&blank, Some(&none)));
    }

    #[test]
    fn score_is_clamped_to_100() {
        let c = company("a")
            .with_status("active")
            .with_industry("Fintech")
            .founded(2000, 1, 1);
        let p = profile(Some("Fintech"), None);
        let ctx = ScoringContext {
            company: &c,
            profile: Some(&p),
            age: company_age(&c, date(2024, 1, 1)),
        };
        assert_eq!(score(&ctx), MAX_SCORE);
    }

    #[test]
    fn future_founding_gets_negative_age_and_no_bonus() {
        let c = company("a").founded(2030, 1, 1);
        let entries = opportunity_analysis(std::slice::from_ref(&c), None, date(2024, 1, 1));
        assert_eq!(entries[0].age, -6);
        assert_eq!(entries[0].score, BASE_SCORE);
    }

    #[test]
    fn entries_keep_input_order_and_fill_defaults() {
        let companies = vec![
            company("a").named("Low").with_status("pending"),
            company("b")
                .named("High")
                .with_status("active")
                .founded(2010, 1, 1),
            company("c"),
        ];

        let entries = opportunity_analysis(&companies, None, date(2024, 1, 1));
        let names: Vec<_> = entries.iter().map(|e| e.company.as_str()).collect();
        assert_eq!(names, vec!["Low", "High", ""]);
        assert_eq!(entries[1].score, 90);
        assert_eq!(entries[1].age, 14);
        assert_eq!(entries[2].industry, "");
        assert_eq!(entries[2].status, "unknown");
        assert_eq!(entries[2].score, BASE_SCORE);
    }
}

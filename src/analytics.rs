//! Lead statistics for the dashboard and analytics screens.
//!
//! Everything is derived from the lead list already fetched from the API;
//! there is no separate analytics endpoint.

use chrono::{Datelike, Duration, NaiveDate};
use std::collections::BTreeMap;

use crate::models::lead::{Lead, LeadStatus};
use crate::models::parse_server_date;

/// Label plus count, ordered for display
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bucket {
    pub label: String,
    pub count: usize,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LeadStats {
    pub total: usize,
    /// Created within the seven days up to and including `today`
    pub new_this_week: usize,
    pub by_status: Vec<Bucket>,
    /// Converted leads as a percentage of all leads
    pub conversion_rate: f64,
    pub by_event_type: Vec<Bucket>,
    pub by_booth: Vec<Bucket>,
    /// Twelve calendar months ending with `today`'s month, oldest first
    pub monthly: Vec<Bucket>,
}

impl LeadStats {
    pub fn from_leads(leads: &[Lead], today: NaiveDate) -> Self {
        let total = leads.len();
        let week_start = today - Duration::days(6);

        let created: Vec<Option<NaiveDate>> = leads
            .iter()
            .map(|l| parse_server_date(&l.created_at))
            .collect();

        let new_this_week = created
            .iter()
            .flatten()
            .filter(|d| **d >= week_start && **d <= today)
            .count();

        let by_status = LeadStatus::ALL
            .iter()
            .map(|status| Bucket {
                label: status.to_string(),
                count: leads.iter().filter(|l| l.status == *status).count(),
            })
            .collect::<Vec<_>>();

        let converted = leads
            .iter()
            .filter(|l| l.status == LeadStatus::Converted)
            .count();
        let conversion_rate = if total == 0 {
            0.0
        } else {
            converted as f64 * 100.0 / total as f64
        };

        Self {
            total,
            new_this_week,
            by_status,
            conversion_rate,
            by_event_type: ranked(leads.iter().map(|l| l.event_type.as_deref())),
            by_booth: ranked(leads.iter().map(|l| l.booth_choice.as_deref())),
            monthly: monthly(&created, today),
        }
    }

    /// Largest bucket count, for scaling bar widths
    pub fn peak_month(&self) -> usize {
        self.monthly.iter().map(|b| b.count).max().unwrap_or(0)
    }
}

/// Count labels, most frequent first; blanks become "Other"
fn ranked<'a>(values: impl Iterator<Item = Option<&'a str>>) -> Vec<Bucket> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for value in values {
        let label = match value.map(str::trim) {
            Some(v) if !v.is_empty() => v.to_string(),
            _ => "Other".to_string(),
        };
        *counts.entry(label).or_default() += 1;
    }
    let mut buckets: Vec<Bucket> = counts
        .into_iter()
        .map(|(label, count)| Bucket { label, count })
        .collect();
    buckets.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
    buckets
}

fn monthly(created: &[Option<NaiveDate>], today: NaiveDate) -> Vec<Bucket> {
    let month_index = |d: NaiveDate| d.year() * 12 + d.month0() as i32;
    let current = month_index(today);

    (0..12)
        .rev()
        .map(|back| {
            let index = current - back;
            let (year, month0) = (index.div_euclid(12), index.rem_euclid(12) as u32);
            let label = NaiveDate::from_ymd_opt(year, month0 + 1, 1)
                .map(|d| d.format("%b %Y").to_string())
                .unwrap_or_default();
            let count = created
                .iter()
                .flatten()
                .filter(|d| month_index(**d) == index)
                .count();
            Bucket { label, count }
        })
        .collect()
}

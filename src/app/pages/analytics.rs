//! Analytics page: lead funnel, event mix, and booth demand.

use dioxus::prelude::*;

use super::dashboard::{use_lead_stats, BarList, StatCard};
use crate::app::components::{ErrorAlert, Layout};

#[component]
pub fn Analytics() -> Element {
    let stats = use_lead_stats();
    let stats = stats.read().clone();

    rsx! {
        Layout {
            title: "Analytics".to_string(),
            subtitle: Some("Business performance insights".to_string()),
            nav_active: "analytics".to_string(),

            {match stats {
                None => rsx! { p { class: "text-muted", "Loading..." } },
                Some(Err(message)) => rsx! { ErrorAlert { message } },
                Some(Ok(stats)) => {
                    let rate = format!("{:.1}%", stats.conversion_rate);
                    let funnel_peak = stats.by_status.iter().map(|b| b.count).max().unwrap_or(0);
                    rsx! {
                        div { class: "stat-grid",
                            StatCard { title: "Total Leads", value: stats.total.to_string() }
                            StatCard { title: "Conversion Rate", value: rate }
                        }
                        div { class: "card",
                            h3 { "Monthly Leads" }
                            BarList { buckets: stats.monthly.clone(), peak: stats.peak_month() }
                        }
                        div { class: "card",
                            h3 { "Conversion Funnel" }
                            BarList { buckets: stats.by_status.clone(), peak: funnel_peak }
                        }
                        div { class: "card",
                            h3 { "Popular Event Types" }
                            BarList {
                                peak: stats.by_event_type.first().map(|b| b.count).unwrap_or(0),
                                buckets: stats.by_event_type.clone(),
                            }
                        }
                        div { class: "card",
                            h3 { "Booth Demand" }
                            BarList {
                                peak: stats.by_booth.first().map(|b| b.count).unwrap_or(0),
                                buckets: stats.by_booth.clone(),
                            }
                        }
                    }
                }
            }}
        }
    }
}

//! Dashboard page: headline numbers and recent trends.

use dioxus::prelude::*;

use crate::analytics::{Bucket, LeadStats};
use crate::api::gallery::GalleryClient;
use crate::api::leads::LeadsClient;
use crate::api::traits::EntityClient;
use crate::app::components::{ErrorAlert, Layout};
use crate::app::services::use_services;

/// Fetch every lead once and derive statistics from it
pub(super) fn use_lead_stats() -> Resource<Result<LeadStats, String>> {
    let services = use_services();
    use_resource(move || {
        let client = LeadsClient::new(services.api.clone());
        async move {
            let leads = client.list().await.map_err(|e| {
                tracing::warn!(kind = e.kind(), "Failed to load leads for statistics: {}", e);
                "Could not load lead statistics".to_string()
            })?;
            Ok(LeadStats::from_leads(&leads, chrono::Local::now().date_naive()))
        }
    })
}

#[component]
pub fn Dashboard() -> Element {
    let services = use_services();
    let stats = use_lead_stats();
    let image_count = use_resource(move || {
        let client = GalleryClient::new(services.api.clone());
        async move { client.list().await.map(|images| images.len()).ok() }
    });

    let stats = stats.read().clone();
    let images = match image_count.read().clone().flatten() {
        Some(n) => n.to_string(),
        None => "-".to_string(),
    };

    rsx! {
        Layout {
            title: "Dashboard".to_string(),
            subtitle: Some("Welcome back! Here's your business overview.".to_string()),
            nav_active: "dashboard".to_string(),

            {match stats {
                None => rsx! { p { class: "text-muted", "Loading..." } },
                Some(Err(message)) => rsx! { ErrorAlert { message } },
                Some(Ok(stats)) => {
                    let converted = stats
                        .by_status
                        .iter()
                        .find(|b| b.label == "Converted")
                        .map(|b| b.count)
                        .unwrap_or(0);
                    rsx! {
                        div { class: "stat-grid",
                            StatCard { title: "Total Leads", value: stats.total.to_string() }
                            StatCard { title: "New This Week", value: stats.new_this_week.to_string() }
                            StatCard { title: "Events Booked", value: converted.to_string() }
                            StatCard { title: "Gallery Images", value: images.clone() }
                        }
                        div { class: "card",
                            h3 { "Leads per Month" }
                            BarList { buckets: stats.monthly.clone(), peak: stats.peak_month() }
                        }
                        div { class: "card",
                            h3 { "Event Type Distribution" }
                            BarList {
                                peak: stats.by_event_type.first().map(|b| b.count).unwrap_or(0),
                                buckets: stats.by_event_type.clone(),
                            }
                        }
                    }
                }
            }}
        }
    }
}

#[component]
pub(super) fn StatCard(title: &'static str, value: String) -> Element {
    rsx! {
        div { class: "card",
            div { class: "text-muted", "{title}" }
            div { class: "stat-value", "{value}" }
        }
    }
}

/// Horizontal bars scaled against `peak`
#[component]
pub(super) fn BarList(buckets: Vec<Bucket>, peak: usize) -> Element {
    if buckets.is_empty() {
        return rsx! { p { class: "text-muted", "No data yet." } };
    }
    rsx! {
        for bucket in buckets {
            div { key: "{bucket.label}", style: "display:flex;align-items:center;gap:.75rem;margin:.25rem 0;",
                span { style: "width:110px;", "{bucket.label}" }
                div { style: "flex:1;",
                    div {
                        class: "bar",
                        style: format!("width:{}%;", bar_width(bucket.count, peak)),
                    }
                }
                span { style: "width:3rem;text-align:right;", "{bucket.count}" }
            }
        }
    }
}

fn bar_width(count: usize, peak: usize) -> usize {
    if peak == 0 {
        0
    } else {
        count * 100 / peak
    }
}

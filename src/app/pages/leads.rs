//! Leads page: booking enquiries with inline status changes.

use dioxus::prelude::*;

use crate::api::leads::LeadsClient;
use crate::app::components::{ConfirmDialog, Layout, Modal, PaginationBar, StatusBadge};
use crate::app::list_handle::use_list;
use crate::models::{format_display_date, Lead, LeadStatus};

#[component]
pub fn Leads() -> Element {
    let leads = use_list(|services| LeadsClient::new(services.api.clone()));
    let mut pending_delete = use_signal(|| None::<Lead>);
    let mut details = use_signal(|| None::<Lead>);
    let view = leads.view();

    rsx! {
        Layout {
            title: "Leads".to_string(),
            subtitle: Some("Manage booking enquiries from the website".to_string()),
            nav_active: "leads".to_string(),

            div { class: "card",
                if !view.loaded {
                    p { class: "text-muted", "Loading leads..." }
                } else if view.total == 0 {
                    p { class: "text-muted", "No leads yet." }
                } else {
                    table {
                        thead {
                            tr {
                                th { "Customer" }
                                th { "Contact" }
                                th { "Event date" }
                                th { "Event type" }
                                th { "Status" }
                                th { "Actions" }
                            }
                        }
                        tbody {
                            for row in view.rows.iter().cloned() {
                                LeadRow {
                                    key: "{row.entity.id}",
                                    lead: row.entity.clone(),
                                    busy: row.busy,
                                    on_status: {
                                        let id = row.entity.id.clone();
                                        move |status: LeadStatus| leads.set_status(id.clone(), status)
                                    },
                                    on_view: {
                                        let lead = row.entity.clone();
                                        move |_| details.set(Some(lead.clone()))
                                    },
                                    on_delete: {
                                        let lead = row.entity.clone();
                                        move |_| pending_delete.set(Some(lead.clone()))
                                    },
                                }
                            }
                        }
                    }
                    PaginationBar {
                        label: view.range_label.clone(),
                        page: view.page,
                        total_pages: view.total_pages,
                        has_prev: view.has_prev,
                        has_next: view.has_next,
                        on_prev: move |_| leads.prev_page(),
                        on_next: move |_| leads.next_page(),
                        on_page: move |n: usize| leads.go_to_page(n),
                    }
                }
            }

            if let Some(lead) = details() {
                Modal { title: format!("Lead: {}", lead.customer_name), on_close: move |_| details.set(None),
                    LeadDetails { lead }
                }
            }

            if let Some(lead) = pending_delete() {
                ConfirmDialog {
                    message: format!("Delete the lead from {}? This cannot be undone.", lead.customer_name),
                    on_cancel: move |_| pending_delete.set(None),
                    on_confirm: move |_| {
                        leads.delete_confirmed(lead.id.clone());
                        pending_delete.set(None);
                    },
                }
            }
        }
    }
}

#[component]
fn LeadRow(
    lead: Lead,
    busy: bool,
    on_status: EventHandler<LeadStatus>,
    on_view: EventHandler<()>,
    on_delete: EventHandler<()>,
) -> Element {
    let event_date = format_display_date(&lead.event_date);
    let event_type = lead.event_type.clone().unwrap_or_else(|| "-".to_string());
    let current = lead.status;

    rsx! {
        tr { class: if busy { "busy" } else { "" },
            td { "{lead.customer_name}" }
            td {
                div { "{lead.email}" }
                small { class: "text-muted", "{lead.phone_number}" }
            }
            td { "{event_date}" }
            td { "{event_type}" }
            td {
                StatusBadge { status: current.to_string() }
                select {
                    disabled: busy,
                    value: "{current}",
                    onchange: move |e| {
                        if let Some(status) = LeadStatus::parse(&e.value()) {
                            if status != current {
                                on_status.call(status);
                            }
                        }
                    },
                    for status in LeadStatus::ALL {
                        option {
                            key: "{status}",
                            value: "{status}",
                            selected: status == current,
                            "{status}"
                        }
                    }
                }
            }
            td {
                button { class: "btn", disabled: busy, onclick: move |_| on_view.call(()), "View" }
                button {
                    class: "btn btn-danger",
                    disabled: busy,
                    onclick: move |_| on_delete.call(()),
                    if busy { "Deleting..." } else { "Delete" }
                }
            }
        }
    }
}

#[component]
fn LeadDetails(lead: Lead) -> Element {
    let summary = lead.details_text();
    let guests = lead
        .number_of_guests
        .map(|n| n.to_string())
        .unwrap_or_else(|| "-".to_string());
    let received = format_display_date(&lead.created_at);
    let event_date = format_display_date(&lead.event_date);
    let booth = lead.booth_choice.clone().unwrap_or_else(|| "-".to_string());

    rsx! {
        dl {
            dt { "Email" }
            dd { "{lead.email}" }
            dt { "Phone" }
            dd { "{lead.phone_number}" }
            dt { "Event" }
            dd { "{event_date} {lead.event_time} ({lead.event_postcode})" }
            dt { "Guests" }
            dd { "{guests}" }
            dt { "Booth" }
            dd { "{booth}" }
            dt { "Received" }
            dd { "{received}" }
        }
        div { class: "field",
            label { "Details for copying" }
            textarea { readonly: true, rows: "8", value: "{summary}" }
        }
    }
}

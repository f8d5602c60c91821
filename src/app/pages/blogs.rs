//! Blog page: post list plus the two-step authoring dialog.
//!
//! Step one collects metadata (and an optional cover image, uploaded as
//! soon as it is picked); step two collects the body. The post itself is
//! sent once, on save.

use dioxus::prelude::*;

use crate::api::posts::{CategoriesClient, PostsClient};
use crate::app::components::{
    ConfirmDialog, ErrorAlert, Layout, Modal, PaginationBar, SelectInput, TextAreaInput, TextInput,
};
use crate::app::list_handle::{use_list, use_pipeline};
use crate::app::services::use_services;
use crate::list::DraftForm;
use crate::models::{format_display_date, BlogPost, Category, DraftStep, EntityId, PostDraft};
use crate::upload::{SelectedFile, UploadStatus};

#[component]
pub fn Blogs() -> Element {
    let services = use_services();
    let posts = use_list(|services| PostsClient::new(services.api.clone()));
    let pipeline = use_pipeline(|services| PostsClient::new(services.api.clone()));

    let categories = use_resource(move || {
        let client = CategoriesClient::new(services.api.clone());
        async move {
            client.list().await.unwrap_or_else(|e| {
                tracing::warn!(kind = e.kind(), "Failed to load post categories: {}", e);
                Vec::new()
            })
        }
    });

    let mut form = use_signal(DraftForm::<PostDraft>::new);
    let mut image_status = use_signal(UploadStatus::default);
    let mut pending_delete = use_signal(|| None::<BlogPost>);

    let view = posts.view();
    let category_list: Vec<Category> = categories.read().clone().unwrap_or_default();
    let category_options: Vec<(String, String)> = category_list
        .iter()
        .map(|c| (c.id.to_string(), c.name.clone()))
        .collect();
    let category_name = move |id: &Option<EntityId>| -> String {
        id.as_ref()
            .and_then(|id| category_list.iter().find(|c| &c.id == id))
            .map(|c| c.name.clone())
            .unwrap_or_else(|| "-".to_string())
    };

    // Cover image: uploaded on selection; the draft changes only on success
    let on_image = move |evt: FormEvent| async move {
        let Some(file) = evt.files().into_iter().next() else {
            return;
        };
        let name = file.name();
        let bytes = match file.read_bytes().await {
            Ok(bytes) => bytes.to_vec(),
            Err(e) => {
                tracing::warn!(file = %name, "Could not read selected file: {}", e);
                form.write().set_error("Could not read the selected file");
                return;
            }
        };
        let pipeline = pipeline.read().clone();
        let result = pipeline
            .run(SelectedFile { name, bytes }, Vec::new(), move |status| {
                image_status.set(status)
            })
            .await;
        if let Ok(asset) = result {
            form.write().draft.image_link = asset.url;
        }
        posts.sync();
    };

    let mut close_form = move || {
        if !form.read().is_submitting() && !image_status().is_running() {
            form.write().close();
            image_status.set(UploadStatus::Idle);
        }
    };

    let editing = form.read().editing().is_some();
    let step = form.read().step();
    let draft = form.read().draft.clone();
    let submitting = form.read().is_submitting();
    let uploading = image_status().is_running();

    rsx! {
        Layout {
            title: "Blogs".to_string(),
            subtitle: Some("Write and manage blog posts".to_string()),
            nav_active: "blogs".to_string(),
            actions: rsx! {
                button { class: "btn btn-primary", onclick: move |_| form.write().open_create(), "New Post" }
            },

            div { class: "card",
                if !view.loaded {
                    p { class: "text-muted", "Loading posts..." }
                } else if view.total == 0 {
                    p { class: "text-muted", "No posts yet." }
                } else {
                    table {
                        thead {
                            tr {
                                th { "Title" }
                                th { "Category" }
                                th { "Author" }
                                th { "Created" }
                                th { "Actions" }
                            }
                        }
                        tbody {
                            for row in view.rows.iter().cloned() {
                                tr { key: "{row.entity.id}", class: if row.busy { "busy" } else { "" },
                                    td { "{row.entity.title}" }
                                    td { {category_name(&row.entity.category_id)} }
                                    td { "{row.entity.author}" }
                                    td { {format_display_date(&row.entity.created_at)} }
                                    td {
                                        button {
                                            class: "btn",
                                            disabled: row.busy,
                                            onclick: {
                                                let post = row.entity.clone();
                                                move |_| form.write().open_edit(post.id.clone(), PostDraft::from_post(&post))
                                            },
                                            "Edit"
                                        }
                                        button {
                                            class: "btn btn-danger",
                                            disabled: row.busy,
                                            onclick: {
                                                let post = row.entity.clone();
                                                move |_| pending_delete.set(Some(post.clone()))
                                            },
                                            if row.busy { "Deleting..." } else { "Delete" }
                                        }
                                    }
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
                        on_prev: move |_| posts.prev_page(),
                        on_next: move |_| posts.next_page(),
                        on_page: move |n: usize| posts.go_to_page(n),
                    }
                }
            }

            if form.read().is_open() {
                Modal {
                    title: if editing { "Edit Post".to_string() } else { "New Post".to_string() },
                    on_close: move |_| close_form(),

                    if let Some(message) = form.read().error().map(str::to_string) {
                        ErrorAlert { message }
                    }

                    if step == DraftStep::Metadata {
                        TextInput {
                            label: "Title",
                            value: draft.title.clone(),
                            on_change: move |v: String| form.write().draft.title = v,
                        }
                        SelectInput {
                            label: "Category",
                            value: draft.category_id.as_ref().map(|id| id.to_string()).unwrap_or_default(),
                            options: category_options.clone(),
                            placeholder: "Select a category",
                            on_change: move |v: String| {
                                form.write().draft.category_id = (!v.is_empty()).then(|| EntityId::new(v));
                            },
                        }
                        TextAreaInput {
                            label: "Short description",
                            value: draft.short_content.clone(),
                            rows: 3,
                            on_change: move |v: String| form.write().draft.short_content = v,
                        }
                        TextInput {
                            label: "Tag",
                            value: draft.tag.clone(),
                            on_change: move |v: String| form.write().draft.tag = v,
                        }
                        TextInput {
                            label: "Author",
                            value: draft.author.clone(),
                            on_change: move |v: String| form.write().draft.author = v,
                        }
                        TextInput {
                            label: "Language",
                            value: draft.language.clone(),
                            placeholder: "en",
                            on_change: move |v: String| form.write().draft.language = v,
                        }
                        TextInput {
                            label: "Image credit",
                            value: draft.attr.clone(),
                            on_change: move |v: String| form.write().draft.attr = v,
                        }
                        div { class: "field",
                            label { "Cover image" }
                            input { r#type: "file", accept: "image/*", disabled: uploading, onchange: on_image }
                            if uploading {
                                small { class: "text-muted", {image_status().label().to_string()} }
                            }
                            if !draft.image_link.is_empty() {
                                img { src: "{draft.image_link}", alt: "Cover", style: "max-width:200px;margin-top:.5rem;" }
                            }
                        }
                        div { class: "modal-actions",
                            button { class: "btn", onclick: move |_| close_form(), "Cancel" }
                            button {
                                class: "btn btn-primary",
                                disabled: uploading,
                                onclick: move |_| {
                                    let _ = form.write().advance();
                                },
                                "Next"
                            }
                        }
                    } else {
                        TextAreaInput {
                            label: "Content (HTML)",
                            value: draft.content.clone(),
                            rows: 14,
                            on_change: move |v: String| form.write().draft.content = v,
                        }
                        div { class: "modal-actions",
                            button {
                                class: "btn",
                                disabled: submitting,
                                onclick: move |_| form.write().back(),
                                "Back"
                            }
                            button {
                                class: "btn btn-primary",
                                disabled: submitting,
                                onclick: move |_| posts.submit(form),
                                if submitting { "Saving..." } else if editing { "Update Post" } else { "Publish Post" }
                            }
                        }
                    }
                }
            }

            if let Some(post) = pending_delete() {
                ConfirmDialog {
                    message: format!("Delete \"{}\"? This cannot be undone.", post.title),
                    on_cancel: move |_| pending_delete.set(None),
                    on_confirm: move |_| {
                        posts.delete_confirmed(post.id.clone());
                        pending_delete.set(None);
                    },
                }
            }
        }
    }
}

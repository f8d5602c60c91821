//! Gallery page: uploaded event photos, grouped by category.

use dioxus::prelude::*;

use crate::api::gallery::GalleryClient;
use crate::app::components::{ConfirmDialog, ErrorAlert, Layout, Modal, PaginationBar, SelectInput};
use crate::app::list_handle::{use_list, use_pipeline};
use crate::list::DraftForm;
use crate::models::{format_display_date, GalleryDraft, GalleryImage, GALLERY_CATEGORIES};
use crate::upload::{SelectedFile, UploadStatus};

#[component]
pub fn Gallery() -> Element {
    let gallery = use_list(|services| GalleryClient::new(services.api.clone()));
    let pipeline = use_pipeline(|services| GalleryClient::new(services.api.clone()));

    let mut form = use_signal(DraftForm::<GalleryDraft>::new);
    let mut selected = use_signal(|| None::<SelectedFile>);
    let mut upload_status = use_signal(UploadStatus::default);
    let mut pending_delete = use_signal(|| None::<GalleryImage>);

    let view = gallery.view();
    let categories: Vec<(String, String)> = GALLERY_CATEGORIES
        .iter()
        .map(|c| (c.to_string(), c.to_string()))
        .collect();

    let on_file = move |evt: FormEvent| async move {
        let Some(file) = evt.files().into_iter().next() else {
            return;
        };
        let name = file.name();
        match file.read_bytes().await {
            Ok(bytes) => selected.set(Some(SelectedFile {
                name,
                bytes: bytes.to_vec(),
            })),
            Err(e) => {
                tracing::warn!(file = %name, "Could not read selected file: {}", e);
                form.write().set_error("Could not read the selected file");
            }
        }
    };

    let start_upload = move |_| {
        let Some(file) = selected() else {
            form.write().set_error("Choose an image to upload");
            return;
        };
        let claimed = form.write().begin_submit();
        let Ok((_, draft)) = claimed else {
            return;
        };
        let pipeline = pipeline.read().clone();
        spawn(async move {
            let metadata = vec![("category".to_string(), draft.category.clone())];
            let result = pipeline
                .run(file, metadata, move |status| upload_status.set(status))
                .await;
            match result {
                Ok(_) => {
                    form.write().finish_submit(&Ok(()));
                    selected.set(None);
                    upload_status.set(UploadStatus::Idle);
                    gallery.load();
                }
                Err(e) => form.write().finish_submit(&Err(e)),
            }
            gallery.sync();
        });
    };

    let mut close_form = move || {
        if !form.read().is_submitting() {
            form.write().close();
            selected.set(None);
            upload_status.set(UploadStatus::Idle);
        }
    };

    rsx! {
        Layout {
            title: "Gallery".to_string(),
            subtitle: Some("Photos shown on the public website".to_string()),
            nav_active: "gallery".to_string(),
            actions: rsx! {
                button { class: "btn btn-primary", onclick: move |_| form.write().open_create(), "Upload Image" }
            },

            div { class: "card",
                if !view.loaded {
                    p { class: "text-muted", "Loading images..." }
                } else if view.total == 0 {
                    p { class: "text-muted", "No images uploaded yet." }
                } else {
                    div { class: "gallery-grid",
                        for row in view.rows.iter().cloned() {
                            figure {
                                key: "{row.entity.id}",
                                class: if row.busy { "busy" } else { "" },
                                img { src: "{row.entity.image_url}", alt: "{row.entity.category}", loading: "lazy" }
                                figcaption {
                                    strong { "{row.entity.category}" }
                                    " "
                                    small { class: "text-muted", {format_display_date(&row.entity.created_at)} }
                                }
                                button {
                                    class: "btn btn-danger",
                                    disabled: row.busy,
                                    onclick: {
                                        let image = row.entity.clone();
                                        move |_| pending_delete.set(Some(image.clone()))
                                    },
                                    if row.busy { "Deleting..." } else { "Delete" }
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
                        on_prev: move |_| gallery.prev_page(),
                        on_next: move |_| gallery.next_page(),
                        on_page: move |n: usize| gallery.go_to_page(n),
                    }
                }
            }

            if form.read().is_open() {
                Modal { title: "Upload Image".to_string(), on_close: move |_| close_form(),
                    if let Some(message) = form.read().error().map(str::to_string) {
                        ErrorAlert { message }
                    }
                    SelectInput {
                        label: "Category",
                        value: form.read().draft.category.clone(),
                        options: categories.clone(),
                        on_change: move |v: String| form.write().draft.category = v,
                    }
                    div { class: "field",
                        label { "Image" }
                        input { r#type: "file", accept: "image/*", onchange: on_file }
                        if let Some(file) = selected() {
                            small { class: "text-muted", {format!("{} ({} KB)", file.name, file.bytes.len() / 1024)} }
                        }
                    }
                    if upload_status().is_running() {
                        p { class: "text-muted", {upload_status().label().to_string()} }
                    }
                    div { class: "modal-actions",
                        button { class: "btn", onclick: move |_| close_form(), "Cancel" }
                        button {
                            class: "btn btn-primary",
                            disabled: form.read().is_submitting(),
                            onclick: start_upload,
                            if form.read().is_submitting() { "Uploading..." } else { "Upload" }
                        }
                    }
                }
            }

            if let Some(image) = pending_delete() {
                ConfirmDialog {
                    message: format!("Delete this {} image?", image.category),
                    on_cancel: move |_| pending_delete.set(None),
                    on_confirm: move |_| {
                        gallery.delete_confirmed(image.id.clone());
                        pending_delete.set(None);
                    },
                }
            }
        }
    }
}

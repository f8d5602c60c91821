//! Binds a `ListController` to a page.
//!
//! The controller owns the list state; the handle mirrors its render
//! snapshot into a signal after every step so the page re-renders, and
//! detaches the controller when the page unmounts. `use_pipeline` does the
//! same job for an upload pipeline.

use std::sync::Arc;

use dioxus::prelude::*;

use super::services::{use_services, AppServices};
use super::session_context::{use_session, SessionContext};
use super::toast_context::{use_toasts, ToastContext};
use crate::api::traits::{BinaryUploader, DraftClient, EntityClient, StatusClient};
use crate::list::{DraftForm, ListController, ListView, Validate};
use crate::models::EntityId;
use crate::upload::UploadPipeline;

pub struct ListHandle<C: EntityClient> {
    controller: CopyValue<ListController<C>>,
    view: Signal<ListView<C::Entity>>,
    toasts: ToastContext,
    session: SessionContext,
}

impl<C: EntityClient> Clone for ListHandle<C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C: EntityClient> Copy for ListHandle<C> {}

impl<C: EntityClient> ListHandle<C> {
    pub fn controller(&self) -> ListController<C> {
        self.controller.read().clone()
    }

    pub fn view(&self) -> ListView<C::Entity> {
        (self.view)()
    }

    /// Publish the controller's state, queued toasts, and any session change
    pub fn sync(&self) {
        let mut view = self.view;
        view.set(self.controller().view());
        self.toasts.flush();
        self.session.sync();
    }

    pub fn load(self) {
        spawn(async move {
            let _ = self.controller().load().await;
            self.sync();
        });
    }

    pub fn next_page(self) {
        self.controller().next_page();
        self.sync();
    }

    pub fn prev_page(self) {
        self.controller().prev_page();
        self.sync();
    }

    pub fn go_to_page(self, page: usize) {
        self.controller().go_to_page(page);
        self.sync();
    }

    /// Delete after the admin confirmed in the dialog
    pub fn delete_confirmed(self, id: EntityId) {
        let controller = self.controller();
        match controller.begin_delete(&id, |_| true) {
            Ok(Some(pending)) => {
                self.sync();
                spawn(async move {
                    let _ = controller.finish_delete(pending).await;
                    self.sync();
                });
            }
            Ok(None) => {}
            Err(e) => tracing::debug!(%id, "delete not started: {}", e),
        }
    }
}

impl<C: StatusClient> ListHandle<C> {
    /// The new status shows immediately; it reverts if the server refuses
    pub fn set_status(self, id: EntityId, status: C::Status) {
        let controller = self.controller();
        match controller.begin_status_update(&id, status) {
            Ok(pending) => {
                self.sync();
                spawn(async move {
                    let _ = controller.finish_status_update(pending).await;
                    self.sync();
                });
            }
            Err(e) => tracing::debug!(%id, "status change not started: {}", e),
        }
    }
}

impl<C> ListHandle<C>
where
    C: DraftClient,
    C::Draft: Default + Validate,
{
    /// Submit the dialog's draft; the dialog closes only on success
    pub fn submit(self, mut form: Signal<DraftForm<C::Draft>>) {
        let claimed = form.write().begin_submit();
        let Ok((editing, draft)) = claimed else {
            return;
        };
        spawn(async move {
            let controller = self.controller();
            let result = controller.save(editing.as_ref(), &draft).await;
            form.write().finish_submit(&result);
            self.sync();
        });
    }
}

/// Create a controller for this page and start the first load
pub fn use_list<C: EntityClient>(make_client: impl FnOnce(&AppServices) -> C) -> ListHandle<C> {
    let services = use_services();
    let toasts = use_toasts();
    let session = use_session();

    let controller = use_hook(|| {
        CopyValue::new(ListController::new(
            Arc::new(make_client(&services)),
            services.config.page_size,
            services.notifications.clone(),
        ))
    });
    let view = use_signal(|| controller.read().view());

    let handle = ListHandle {
        controller,
        view,
        toasts,
        session,
    };

    use_effect(move || handle.load());

    let on_unmount = controller.read().clone();
    use_drop(move || on_unmount.detach());

    handle
}

/// Upload pipeline for this page, using the configured image budget
pub fn use_pipeline<U: BinaryUploader + 'static>(
    make_uploader: impl FnOnce(&AppServices) -> U,
) -> CopyValue<UploadPipeline<U>> {
    let services = use_services();
    use_hook(|| {
        CopyValue::new(UploadPipeline::new(
            Arc::new(make_uploader(&services)),
            services.config.upload.clone(),
            services.notifications.clone(),
        ))
    })
}

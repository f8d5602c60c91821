//! List view controller shared by the leads, gallery and blog screens.
//!
//! `ListState` is the synchronous model. `ListController` runs the remote
//! calls against it: loads replace the collection wholesale, status changes
//! apply optimistically and roll back per row, deletes wait for the server,
//! and draft submits refresh from the server once confirmed.
//!
//! Every response is checked against the generation it was issued under, so
//! results that land after the view detached are dropped.

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, info, warn};

use crate::api::traits::{DraftClient, EntityClient, StatusClient};
use crate::error::AdminError;
use crate::models::{Entity, EntityId};
use crate::notify::Notifications;

pub mod draft;
pub mod pagination;
pub mod state;

pub use draft::{DraftForm, Validate};
pub use pagination::Pagination;
pub use state::{ListState, PendingDelete, PendingStatus};

/// One visible row and whether it is locked by an in-flight delete
#[derive(Clone, Debug, PartialEq)]
pub struct ListRow<E> {
    pub entity: E,
    pub busy: bool,
}

/// Render snapshot of the current page
#[derive(Clone, Debug, PartialEq)]
pub struct ListView<E> {
    pub rows: Vec<ListRow<E>>,
    pub total: usize,
    pub page: usize,
    pub total_pages: usize,
    pub has_prev: bool,
    pub has_next: bool,
    pub range_label: String,
    pub loading: bool,
    pub loaded: bool,
    pub submitting: bool,
}

pub struct ListController<C: EntityClient> {
    client: Arc<C>,
    state: Arc<Mutex<ListState<C::Entity>>>,
    notifications: Notifications,
}

impl<C: EntityClient> Clone for ListController<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            state: Arc::clone(&self.state),
            notifications: self.notifications.clone(),
        }
    }
}

impl<C: EntityClient> ListController<C> {
    pub fn new(client: Arc<C>, page_size: usize, notifications: Notifications) -> Self {
        Self {
            client,
            state: Arc::new(Mutex::new(ListState::new(page_size))),
            notifications,
        }
    }

    pub fn client(&self) -> &Arc<C> {
        &self.client
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    fn lock(&self) -> MutexGuard<'_, ListState<C::Entity>> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Run `f` against the state; the lock is released before returning
    pub fn with_state<T>(&self, f: impl FnOnce(&mut ListState<C::Entity>) -> T) -> T {
        f(&mut self.lock())
    }

    pub fn view(&self) -> ListView<C::Entity> {
        self.with_state(|s| {
            let count = s.len();
            let pagination = *s.pagination();
            ListView {
                rows: s
                    .page_items()
                    .iter()
                    .map(|e| ListRow {
                        busy: s.is_busy(e.id()),
                        entity: e.clone(),
                    })
                    .collect(),
                total: count,
                page: pagination.page(),
                total_pages: pagination.total_pages(count),
                has_prev: pagination.has_prev(),
                has_next: pagination.has_next(count),
                range_label: pagination.range_label(count),
                loading: s.is_loading(),
                loaded: s.is_loaded(),
                submitting: s.is_submitting(),
            }
        })
    }

    pub fn next_page(&self) -> bool {
        self.with_state(|s| s.next_page())
    }

    pub fn prev_page(&self) -> bool {
        self.with_state(|s| s.prev_page())
    }

    pub fn go_to_page(&self, page: usize) -> bool {
        self.with_state(|s| s.go_to_page(page))
    }

    /// Drop every outstanding response; called when the view unmounts
    pub fn detach(&self) {
        debug!(family = self.client.family(), "list view detached");
        self.with_state(|s| s.detach());
    }

    /// Fetch the authoritative collection.
    ///
    /// On failure the previous collection is kept (empty on a first load)
    /// and an error toast is raised.
    pub async fn load(&self) -> Result<(), AdminError> {
        let family = self.client.family();
        let generation = self.with_state(|s| s.begin_load());

        let result = self.client.list().await;

        let current = self.with_state(|s| {
            if !s.is_current(generation) {
                return false;
            }
            match &result {
                Ok(items) => s.finish_load(items.clone()),
                Err(_) => s.fail_load(),
            }
            true
        });
        if !current {
            debug!(family, "dropping stale list response");
            return Ok(());
        }

        match result {
            Ok(items) => {
                debug!(family, count = items.len(), "list loaded");
                Ok(())
            }
            Err(e) => {
                warn!(family, kind = e.kind(), error = %e, "list load failed");
                let err = AdminError::FetchFailed(e);
                self.notifications.error(err.user_message());
                Err(err)
            }
        }
    }

    /// Same as `load`; named for call sites that follow a write
    pub async fn refresh(&self) -> Result<(), AdminError> {
        self.load().await
    }

    /// Confirm and claim a row for deletion.
    ///
    /// Returns `Ok(None)` when `confirm` declines. Otherwise the row is
    /// reported busy until `finish_delete` settles it.
    pub fn begin_delete(
        &self,
        id: &EntityId,
        confirm: impl FnOnce(&C::Entity) -> bool,
    ) -> Result<Option<PendingDelete>, AdminError> {
        let (row, busy) = self.with_state(|s| (s.find(id).cloned(), s.is_busy(id)));
        let row = row.ok_or_else(|| AdminError::NotFound(id.clone()))?;
        if busy {
            return Err(AdminError::Busy);
        }
        if !confirm(&row) {
            debug!(family = self.client.family(), %id, "delete declined");
            return Ok(None);
        }
        let generation = self
            .with_state(|s| s.mark_busy(id).then(|| s.generation()))
            .ok_or(AdminError::Busy)?;
        Ok(Some(PendingDelete {
            id: id.clone(),
            generation,
        }))
    }

    /// Send the delete; the row leaves the list only once the server agrees
    pub async fn finish_delete(&self, pending: PendingDelete) -> Result<(), AdminError> {
        let family = self.client.family();
        let id = &pending.id;
        let result = self.client.remove(id).await;

        let current = self.with_state(|s| {
            if !s.is_current(pending.generation) {
                return false;
            }
            if result.is_ok() {
                s.remove(id);
            } else {
                s.clear_busy(id);
            }
            true
        });
        if !current {
            debug!(family, %id, "dropping stale delete response");
            return result.map_err(AdminError::DeleteFailed);
        }

        match result {
            Ok(()) => {
                info!(family, %id, "deleted");
                self.notifications.success("Deleted successfully");
                Ok(())
            }
            Err(e) => {
                warn!(family, %id, kind = e.kind(), error = %e, "delete failed");
                let err = AdminError::DeleteFailed(e);
                self.notifications.error(err.user_message());
                Err(err)
            }
        }
    }

    /// `begin_delete` then `finish_delete`; `Ok(false)` when declined
    pub async fn delete(
        &self,
        id: &EntityId,
        confirm: impl FnOnce(&C::Entity) -> bool,
    ) -> Result<bool, AdminError> {
        match self.begin_delete(id, confirm)? {
            Some(pending) => self.finish_delete(pending).await.map(|()| true),
            None => Ok(false),
        }
    }
}

impl<C: StatusClient> ListController<C> {
    /// Apply a status change locally and hand back its rollback record
    pub fn begin_status_update(
        &self,
        id: &EntityId,
        status: C::Status,
    ) -> Result<PendingStatus<C::Status>, AdminError> {
        self.with_state(|s| {
            let previous = s
                .find(id)
                .map(C::status_of)
                .ok_or_else(|| AdminError::NotFound(id.clone()))?;
            let pending = s.issue_status(id, previous, status.clone());
            s.update_row(id, |row| C::set_status(row, status));
            Ok(pending)
        })
    }

    /// Send the change. On failure only this row reverts, and only if no
    /// newer change to the same row has been issued since.
    pub async fn finish_status_update(
        &self,
        pending: PendingStatus<C::Status>,
    ) -> Result<(), AdminError> {
        let family = self.client.family();
        let result = self
            .client
            .update_status(&pending.id, &pending.requested)
            .await;

        let settled = self.with_state(|s| {
            if !s.is_current(pending.generation) {
                return None;
            }
            let newest = s.settle_status(&pending);
            if result.is_err() && newest {
                let previous = pending.previous.clone();
                s.update_row(&pending.id, |row| C::set_status(row, previous));
            }
            Some(newest)
        });

        let Some(rolled_back_if_failed) = settled else {
            debug!(family, id = %pending.id, "dropping stale status response");
            return result.map_err(AdminError::WriteFailed);
        };

        match result {
            Ok(()) => {
                info!(family, id = %pending.id, status = %pending.requested, "status updated");
                self.notifications
                    .success(format!("Status updated to {}", pending.requested));
                Ok(())
            }
            Err(e) => {
                warn!(
                    family,
                    id = %pending.id,
                    kind = e.kind(),
                    rolled_back = rolled_back_if_failed,
                    error = %e,
                    "status update failed"
                );
                self.notifications.error("Failed to update status");
                Err(AdminError::WriteFailed(e))
            }
        }
    }

    pub async fn update_status(&self, id: &EntityId, status: C::Status) -> Result<(), AdminError> {
        let pending = self.begin_status_update(id, status)?;
        self.finish_status_update(pending).await
    }
}

impl<C: DraftClient> ListController<C> {
    /// Create (or update, when `editing` is set) from a draft, then reload.
    ///
    /// Nothing is reflected locally until the server confirms. A second
    /// submit while one is outstanding fails with `Busy`.
    pub async fn save(&self, editing: Option<&EntityId>, draft: &C::Draft) -> Result<(), AdminError> {
        let family = self.client.family();
        let generation = self
            .with_state(|s| s.begin_submit().then(|| s.generation()))
            .ok_or(AdminError::Busy)?;

        let result = match editing {
            Some(id) => self.client.update(id, draft).await,
            None => self.client.create(draft).await,
        };

        let current = self.with_state(|s| {
            let current = s.is_current(generation);
            if current {
                s.end_submit();
            }
            current
        });
        if !current {
            debug!(family, "dropping stale save response");
            return result.map(|_| ()).map_err(AdminError::WriteFailed);
        }

        match result {
            Ok(_) => {
                let verb = if editing.is_some() { "Updated" } else { "Created" };
                info!(family, edit = editing.is_some(), "draft saved");
                self.notifications.success(format!("{verb} successfully"));
                // The refresh reports its own failure; the save itself stands
                let _ = self.refresh().await;
                Ok(())
            }
            Err(e) => {
                warn!(family, kind = e.kind(), error = %e, "save failed");
                let err = AdminError::WriteFailed(e);
                self.notifications.error(err.user_message());
                Err(err)
            }
        }
    }
}

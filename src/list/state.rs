//! Synchronous list state. No I/O happens here; the controller drives it.

use std::collections::{HashMap, HashSet};

use super::pagination::Pagination;
use crate::models::{Entity, EntityId};

/// Rollback record for one optimistic status change.
///
/// Holds the snapshot of its own row only, so concurrent changes on
/// different rows never share rollback data.
#[derive(Clone, Debug, PartialEq)]
pub struct PendingStatus<S> {
    pub id: EntityId,
    pub previous: S,
    pub requested: S,
    pub(crate) ticket: u64,
    pub(crate) generation: u64,
}

/// A confirmed delete awaiting the server
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingDelete {
    pub id: EntityId,
    pub(crate) generation: u64,
}

#[derive(Debug)]
pub struct ListState<E: Entity> {
    items: Vec<E>,
    loading: bool,
    loaded: bool,
    submitting: bool,
    pagination: Pagination,
    /// Rows with a delete in flight
    busy: HashSet<EntityId>,
    /// Newest status ticket per row
    status_tickets: HashMap<EntityId, u64>,
    next_ticket: u64,
    generation: u64,
    attached: bool,
}

impl<E: Entity> ListState<E> {
    pub fn new(page_size: usize) -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            loaded: false,
            submitting: false,
            pagination: Pagination::new(page_size),
            busy: HashSet::new(),
            status_tickets: HashMap::new(),
            next_ticket: 0,
            generation: 0,
            attached: true,
        }
    }

    pub fn items(&self) -> &[E] {
        &self.items
    }

    pub fn page_items(&self) -> &[E] {
        self.pagination.slice(&self.items)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// True once any load has finished, successfully or not
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn is_busy(&self, id: &EntityId) -> bool {
        self.busy.contains(id)
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn find(&self, id: &EntityId) -> Option<&E> {
        self.items.iter().find(|e| e.id() == id)
    }

    pub fn next_page(&mut self) -> bool {
        let count = self.items.len();
        self.pagination.next(count)
    }

    pub fn prev_page(&mut self) -> bool {
        self.pagination.prev()
    }

    pub fn go_to_page(&mut self, page: usize) -> bool {
        let count = self.items.len();
        self.pagination.go_to(page, count)
    }

    /// Mark a fetch as started; returns the generation it belongs to
    pub fn begin_load(&mut self) -> u64 {
        self.loading = true;
        self.generation
    }

    /// Replace the collection with the authoritative list
    pub fn finish_load(&mut self, items: Vec<E>) {
        self.items = items;
        self.loading = false;
        self.loaded = true;
        let count = self.items.len();
        self.pagination.clamp(count);
        self.busy.retain(|id| self.items.iter().any(|e| e.id() == id));
    }

    /// The previous collection stays as it was
    pub fn fail_load(&mut self) {
        self.loading = false;
        self.loaded = true;
    }

    /// Apply `change` to one row in place; false when the row is gone
    pub fn update_row(&mut self, id: &EntityId, change: impl FnOnce(&mut E)) -> bool {
        match self.items.iter_mut().find(|e| e.id() == id) {
            Some(row) => {
                change(row);
                true
            }
            None => false,
        }
    }

    /// Issue a pending status record and register it as the newest for its row
    pub fn issue_status<S>(&mut self, id: &EntityId, previous: S, requested: S) -> PendingStatus<S> {
        self.next_ticket += 1;
        let ticket = self.next_ticket;
        self.status_tickets.insert(id.clone(), ticket);
        PendingStatus {
            id: id.clone(),
            previous,
            requested,
            ticket,
            generation: self.generation,
        }
    }

    /// Retire a pending status; true when it was still the newest for its row
    pub fn settle_status<S>(&mut self, pending: &PendingStatus<S>) -> bool {
        match self.status_tickets.get(&pending.id) {
            Some(&ticket) if ticket == pending.ticket => {
                self.status_tickets.remove(&pending.id);
                true
            }
            _ => false,
        }
    }

    pub fn has_pending_status(&self, id: &EntityId) -> bool {
        self.status_tickets.contains_key(id)
    }

    /// Claim a row for deletion; false when a delete is already in flight
    pub fn mark_busy(&mut self, id: &EntityId) -> bool {
        self.busy.insert(id.clone())
    }

    pub fn clear_busy(&mut self, id: &EntityId) {
        self.busy.remove(id);
    }

    /// Drop a row after the server confirmed the delete
    pub fn remove(&mut self, id: &EntityId) -> bool {
        self.busy.remove(id);
        self.status_tickets.remove(id);
        let before = self.items.len();
        self.items.retain(|e| e.id() != id);
        let removed = self.items.len() != before;
        if removed {
            let count = self.items.len();
            self.pagination.clamp_after_shrink(count);
        }
        removed
    }

    /// Claim the draft submission slot; false when one is already running
    pub fn begin_submit(&mut self) -> bool {
        if self.submitting {
            false
        } else {
            self.submitting = true;
            true
        }
    }

    pub fn end_submit(&mut self) {
        self.submitting = false;
    }

    /// Invalidate every request issued so far; there is no re-attach
    pub fn detach(&mut self) {
        self.generation += 1;
        self.attached = false;
        self.loading = false;
        self.submitting = false;
        self.busy.clear();
        self.status_tickets.clear();
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.attached && self.generation == generation
    }
}

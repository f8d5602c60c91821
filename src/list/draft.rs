//! Create/edit dialog state.
//!
//! The draft is buffered locally and only sent on submit. It survives a
//! failed submit so the admin can retry without retyping.

use crate::error::AdminError;
use crate::models::{DraftStep, EntityId, GalleryDraft, PostDraft};

/// Completeness check run before a draft is submitted
pub trait Validate {
    fn problem(&self) -> Option<&'static str>;
}

impl Validate for PostDraft {
    fn problem(&self) -> Option<&'static str> {
        self.submit_problem()
    }
}

impl Validate for GalleryDraft {
    fn problem(&self) -> Option<&'static str> {
        if self.category.trim().is_empty() {
            Some("Choose a category")
        } else {
            None
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DraftForm<D> {
    pub draft: D,
    editing: Option<EntityId>,
    open: bool,
    submitting: bool,
    step: DraftStep,
    error: Option<String>,
}

impl<D: Clone + Default + Validate> DraftForm<D> {
    pub fn new() -> Self {
        Self {
            draft: D::default(),
            editing: None,
            open: false,
            submitting: false,
            step: DraftStep::Metadata,
            error: None,
        }
    }

    pub fn open_create(&mut self) {
        *self = Self::new();
        self.open = true;
    }

    pub fn open_edit(&mut self, id: EntityId, draft: D) {
        *self = Self::new();
        self.draft = draft;
        self.editing = Some(id);
        self.open = true;
    }

    /// Dismiss and discard the draft
    pub fn close(&mut self) {
        *self = Self::new();
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn editing(&self) -> Option<&EntityId> {
        self.editing.as_ref()
    }

    pub fn step(&self) -> DraftStep {
        self.step
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    /// Claim the submit; hands back what to send.
    ///
    /// Fails with `Busy` while a submit is outstanding and with
    /// `Validation` when the draft is incomplete.
    pub fn begin_submit(&mut self) -> Result<(Option<EntityId>, D), AdminError> {
        if self.submitting {
            return Err(AdminError::Busy);
        }
        if let Some(problem) = self.draft.problem() {
            self.error = Some(problem.to_string());
            return Err(AdminError::Validation(problem.to_string()));
        }
        self.submitting = true;
        self.error = None;
        Ok((self.editing.clone(), self.draft.clone()))
    }

    /// Close on success; otherwise stay open with the draft intact
    pub fn finish_submit(&mut self, result: &Result<(), AdminError>) {
        match result {
            Ok(()) => self.close(),
            Err(e) => {
                self.submitting = false;
                self.error = Some(e.user_message());
            }
        }
    }
}

impl<D: Clone + Default + Validate> Default for DraftForm<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl DraftForm<PostDraft> {
    /// Move from metadata to content once the metadata is complete
    pub fn advance(&mut self) -> Result<(), AdminError> {
        if let Some(problem) = self.draft.metadata_problem() {
            self.error = Some(problem.to_string());
            return Err(AdminError::Validation(problem.to_string()));
        }
        self.error = None;
        self.step = DraftStep::Content;
        Ok(())
    }

    pub fn back(&mut self) {
        self.step = DraftStep::Metadata;
    }
}

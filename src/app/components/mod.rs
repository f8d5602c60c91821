//! Shared UI components for the admin console.

pub mod confirm;
pub mod error_alert;
pub mod form_inputs;
pub mod layout;
pub mod modal;
pub mod nav;
pub mod pagination;
pub mod status_badge;
pub mod toasts;

pub use confirm::ConfirmDialog;
pub use error_alert::ErrorAlert;
pub use form_inputs::{SelectInput, TextAreaInput, TextInput};
pub use layout::Layout;
pub use modal::Modal;
pub use nav::Nav;
pub use pagination::PaginationBar;
pub use status_badge::StatusBadge;
pub use toasts::ToastHost;

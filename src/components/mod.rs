//! UI Components
//!
//! Each component encapsulates its own state, event handling, and rendering
//! logic. Components communicate through Actions rather than direct state
//! mutation.

pub mod dashboard;
pub mod delete_dialog;
pub mod form;
pub mod help_dialog;
pub mod layout;
pub mod quit_dialog;
pub mod records;
pub mod status_filter_dialog;

pub use dashboard::{ActivityEntry, DashboardView};
pub use delete_dialog::DeleteDialog;
pub use form::RecordFormDialog;
pub use help_dialog::HelpDialog;
pub use layout::{calculate_main_layout, centered_popup, MainLayout};
pub use quit_dialog::QuitDialog;
pub use records::{RecordRow, RecordsView};
pub use status_filter_dialog::StatusFilterDialog;

//! Action enum - All possible application actions
//!
//! Components emit Actions in response to key events, and the App
//! processes them to update state.

use crate::model::{SortField, StatusFilter};

/// All possible actions in the application
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // App lifecycle
    /// Regular tick for timed updates (notification expiry)
    Tick,
    /// Terminal was resized
    Resize(u16, u16),
    /// Quit without confirmation
    ForceQuit,

    // Navigation
    /// Switch to the next top-level view
    NextView,
    /// Move to the next row on the current page
    NextItem,
    /// Move to the previous row on the current page
    PrevItem,
    /// Go to the next page of results
    NextPage,
    /// Go to the previous page of results
    PrevPage,
    /// Cycle rows-per-page through the fixed options
    CyclePageSize,

    // Search
    EnterSearchMode,
    ExitSearchMode,
    SearchInput(char),
    SearchBackspace,
    ClearSearch,

    // Filter & sort
    OpenStatusFilter,
    SetStatusFilter(StatusFilter),
    /// Toggle sort on a field (same field flips the order)
    ToggleSort(SortField),

    // Record mutations
    OpenAddForm,
    OpenEditForm,
    /// Persist the form's draft through the store
    SubmitForm,
    OpenDeleteConfirm,
    /// Delete the record with the given id
    ConfirmDelete(String),
    /// Re-fetch the collection from the store
    ReloadRecords,

    // Export
    ExportCsv,
    ExportReport,

    // Modals
    OpenQuitDialog,
    OpenHelp,
    CloseModal,
    ModalUp,
    ModalDown,
}

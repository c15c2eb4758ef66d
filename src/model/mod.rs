//! Model layer - domain data and the query/aggregation engine
//!
//! This module contains all state-related types:
//! - `Record` / `Status` - the person records the engine operates on
//! - `query` / `QueryState` - filtering and ordering
//! - `paginate` - page arithmetic over the filtered set
//! - `aggregate` / `recent_activity` - dashboard summaries
//! - `ModalStack` - modal overlay management

pub mod modal;
pub mod page;
pub mod query;
pub mod record;
pub mod stats;
pub mod ui;

// Re-export commonly used types
pub use modal::{Modal, ModalStack};
pub use page::{paginate, Page};
pub use query::{query, QueryParams, QueryState, SortField, SortOrder, StatusFilter};
pub use record::{seed_records, Record, Status};
pub use stats::{aggregate, recent_activity};
pub use ui::View;

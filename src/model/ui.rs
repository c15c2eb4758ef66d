//! UI state - presentation state separate from domain data

/// Top-level view selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Dashboard,
    Records,
}

impl View {
    pub fn all() -> Vec<View> {
        vec![View::Dashboard, View::Records]
    }

    pub fn name(&self) -> &'static str {
        match self {
            View::Dashboard => "Dashboard",
            View::Records => "Records",
        }
    }
}

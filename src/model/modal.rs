//! Modal stack for managing overlays
//!
//! A single enum-based stack instead of a pile of boolean flags; only the
//! top modal receives input events.

/// Represents a modal overlay displayed on top of the main UI
#[derive(Debug, Clone, PartialEq)]
pub enum Modal {
    /// Quit confirmation dialog
    QuitConfirm,
    /// Add/edit record form (field state lives in the form component)
    RecordForm,
    /// Delete confirmation for the named record
    DeleteConfirm { id: String, full_name: String },
    /// Status filter picker (cursor state lives in the dialog component)
    StatusFilter,
    /// Keyboard shortcut help (scroll state lives in the dialog component)
    Help,
}

/// A stack of modal overlays
#[derive(Debug, Default)]
pub struct ModalStack {
    stack: Vec<Modal>,
}

impl ModalStack {
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    pub fn push(&mut self, modal: Modal) {
        self.stack.push(modal);
    }

    pub fn pop(&mut self) -> Option<Modal> {
        self.stack.pop()
    }

    pub fn top(&self) -> Option<&Modal> {
        self.stack.last()
    }

    pub fn top_mut(&mut self) -> Option<&mut Modal> {
        self.stack.last_mut()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modal_stack_push_pop() {
        let mut stack = ModalStack::new();
        assert!(stack.top().is_none());

        stack.push(Modal::QuitConfirm);
        stack.push(Modal::Help);

        assert_eq!(stack.pop(), Some(Modal::Help));
        assert_eq!(stack.pop(), Some(Modal::QuitConfirm));
        assert!(stack.top().is_none());
    }

    #[test]
    fn test_modal_stack_top_mut() {
        let mut stack = ModalStack::new();
        stack.push(Modal::DeleteConfirm {
            id: "id-1".to_string(),
            full_name: "Ana".to_string(),
        });

        if let Some(Modal::DeleteConfirm { full_name, .. }) = stack.top_mut() {
            *full_name = "Ana Lima".to_string();
        }

        assert_eq!(
            stack.top(),
            Some(&Modal::DeleteConfirm {
                id: "id-1".to_string(),
                full_name: "Ana Lima".to_string(),
            })
        );
    }
}

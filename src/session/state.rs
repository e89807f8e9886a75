use serde::Serialize;

use crate::model::{Draft, Product};

/// Which commit semantics apply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "id")]
pub enum SessionState {
    /// No form open.
    Idle,
    /// Add form open; commit creates a product.
    Creating,
    /// Edit form open for the product with this id; commit updates it.
    Editing(String),
}

impl SessionState {
    pub(crate) fn of(draft: Option<&Draft>) -> Self {
        match draft {
            None => SessionState::Idle,
            Some(draft) => match draft.target() {
                None => SessionState::Creating,
                Some(id) => SessionState::Editing(id.to_string()),
            },
        }
    }

    pub fn is_form_open(&self) -> bool {
        !matches!(self, SessionState::Idle)
    }
}

/// Everything the presentation layer needs to render after a command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionView {
    pub products: Vec<Product>,
    pub state: SessionState,
    pub draft: Option<Draft>,
}

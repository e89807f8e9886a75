//! # Product Session
//!
//! The sole authority over the product collection and the open edit form.
//!
//! ## State Machine
//!
//! ```text
//!            begin_create                 commit (create) / cancel
//!   Idle ────────────────► Creating ─────────────────────────────► Idle
//!     │                                                             ▲
//!     │ begin_edit(id)                   commit (update) / cancel   │
//!     └─────────────────► Editing(id) ──────────────────────────────┘
//! ```
//!
//! `begin_edit` is accepted from any state and discards whatever draft was open.
//! The state is never stored separately: it is derived from the draft, so the
//! two cannot disagree.
//!
//! ## Persistence
//!
//! The collection is loaded once in [`ProductSession::open`]. Every command that
//! mutates it (`create`, `update`, `delete`) rewrites the full collection through
//! the [`ProductStore`] before returning. A rejected write leaves the in-memory
//! change in place and marks the session dirty; the next mutating command or
//! [`ProductSession::flush`] writes again.

pub mod error;
pub mod id;
pub mod state;

pub use error::*;
pub use state::*;

use tracing::{debug, info, warn};

use crate::model::{Draft, DraftField, Product};
use crate::store::{CorruptStateWarning, Loaded, ProductStore};

pub struct ProductSession<S: ProductStore> {
    store: S,
    products: Vec<Product>,
    draft: Option<Draft>,
    next_id_fn: Box<dyn FnMut() -> String + Send>,
    load_warning: Option<CorruptStateWarning>,
    dirty: bool,
}

impl<S: ProductStore> ProductSession<S> {
    /// Opens a session over `store`, minting timestamp ids.
    pub fn open(store: S) -> Self {
        Self::with_id_source(store, id::timestamp_id)
    }

    /// Opens a session with a custom id source.
    ///
    /// Candidates that collide with an existing id are suffixed until unique, so
    /// the source does not have to guarantee uniqueness itself.
    pub fn with_id_source(store: S, next_id_fn: impl FnMut() -> String + Send + 'static) -> Self {
        let Loaded { products, warning } = store.load();
        if let Some(warning) = &warning {
            warn!(key = %warning.key, reason = %warning.reason, "Stored catalog unreadable, starting empty");
        }
        info!(size = products.len(), "Session opened");

        Self {
            store,
            products,
            draft: None,
            next_id_fn: Box::new(next_id_fn),
            load_warning: warning,
            dirty: false,
        }
    }

    // --- Read accessors ---

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn draft(&self) -> Option<&Draft> {
        self.draft.as_ref()
    }

    pub fn state(&self) -> SessionState {
        SessionState::of(self.draft.as_ref())
    }

    /// Snapshot for the presentation layer.
    pub fn view(&self) -> SessionView {
        SessionView {
            products: self.products.clone(),
            state: self.state(),
            draft: self.draft.clone(),
        }
    }

    /// Set when the stored blob could not be read at open.
    pub fn load_warning(&self) -> Option<&CorruptStateWarning> {
        self.load_warning.as_ref()
    }

    /// True while the last write failed and has not been retried successfully.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    // --- Form commands ---

    /// Opens an empty "add" form, replacing any open draft.
    pub fn begin_create(&mut self) -> SessionView {
        debug!("Begin create");
        self.draft = Some(Draft::new());
        self.view()
    }

    /// Opens the "edit" form pre-filled from the product with `id`.
    ///
    /// # Errors
    /// [`SessionError::NotFound`] if no such product exists; the current form is kept.
    pub fn begin_edit(&mut self, id: &str) -> Result<SessionView, SessionError> {
        debug!(%id, "Begin edit");
        let Some(draft) = self.get(id).map(Draft::for_product) else {
            warn!(%id, "Not found");
            return Err(SessionError::NotFound(id.to_string()));
        };
        if let Some(previous) = self.draft.as_ref().and_then(Draft::target) {
            if previous != id {
                debug!(%previous, "Discarding unsaved edit");
            }
        }
        self.draft = Some(draft);
        Ok(self.view())
    }

    /// Replaces one field of the open draft.
    pub fn update_draft_field(
        &mut self,
        field: DraftField,
        value: impl Into<String>,
    ) -> Result<SessionView, SessionError> {
        let draft = self.draft.as_mut().ok_or(SessionError::NoActiveDraft)?;
        draft.set(field, value);
        Ok(self.view())
    }

    /// Closes the form without touching the collection.
    pub fn cancel_edit(&mut self) -> SessionView {
        if self.draft.take().is_some() {
            debug!("Edit cancelled");
        }
        self.view()
    }

    /// Applies the open draft: creates when `Creating`, updates when `Editing`.
    pub fn commit(&mut self) -> Result<SessionView, SessionError> {
        let draft = self.draft.clone().ok_or(SessionError::NoActiveDraft)?;
        match draft.target() {
            None => self.create(&draft),
            Some(id) => self.update(id, &draft),
        }
    }

    // --- Mutations ---

    /// Appends a product built from `draft` and closes the form.
    ///
    /// # Errors
    /// - [`SessionError::Validation`]: nothing changes.
    /// - [`SessionError::PersistenceWriteFailure`]: the product was added in memory.
    pub fn create(&mut self, draft: &Draft) -> Result<SessionView, SessionError> {
        debug!(?draft, "Create");
        let fields = draft.parse().inspect_err(|e| {
            warn!(error = %e, "Create rejected");
        })?;

        let candidate = (self.next_id_fn)();
        let id = id::dedupe(candidate, |id| self.get(id).is_some());
        self.products.push(Product::new(id.clone(), fields));
        self.draft = None;
        info!(%id, size = self.products.len(), "Created");

        self.persist()?;
        Ok(self.view())
    }

    /// Replaces every field but the id of the product with `id`, in place.
    ///
    /// # Errors
    /// - [`SessionError::Validation`]: nothing changes, the form stays open.
    /// - [`SessionError::NotFound`]: the collection is untouched and the form closes.
    /// - [`SessionError::PersistenceWriteFailure`]: the update was applied in memory.
    pub fn update(&mut self, id: &str, draft: &Draft) -> Result<SessionView, SessionError> {
        debug!(%id, ?draft, "Update");
        let fields = draft.parse().inspect_err(|e| {
            warn!(%id, error = %e, "Update rejected");
        })?;

        let Some(product) = self.products.iter_mut().find(|p| p.id == id) else {
            warn!(%id, "Not found");
            self.draft = None;
            return Err(SessionError::NotFound(id.to_string()));
        };
        product.apply(fields);
        self.draft = None;
        info!(%id, "Updated");

        self.persist()?;
        Ok(self.view())
    }

    /// Removes the product with `id` if present. Deleting an absent id is a no-op
    /// that still rewrites the store.
    ///
    /// An edit form open on the deleted product is closed; any other draft stays.
    pub fn delete(&mut self, id: &str) -> Result<SessionView, SessionError> {
        debug!(%id, "Delete");
        let before = self.products.len();
        self.products.retain(|p| p.id != id);
        if self.products.len() < before {
            info!(%id, size = self.products.len(), "Deleted");
        } else {
            debug!(%id, "Nothing to delete");
        }

        if self.draft.as_ref().and_then(Draft::target) == Some(id) {
            debug!(%id, "Closing edit form for deleted product");
            self.draft = None;
        }

        self.persist()?;
        Ok(self.view())
    }

    /// Retries the write after an earlier failure. Does nothing when clean.
    pub fn flush(&mut self) -> Result<SessionView, SessionError> {
        if self.dirty {
            self.persist()?;
        }
        Ok(self.view())
    }

    fn persist(&mut self) -> Result<(), SessionError> {
        match self.store.save(&self.products) {
            Ok(()) => {
                if self.dirty {
                    info!(size = self.products.len(), "Pending write recovered");
                }
                self.dirty = false;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, size = self.products.len(), "Write failed");
                self.dirty = true;
                Err(SessionError::PersistenceWriteFailure(e.to_string()))
            }
        }
    }
}

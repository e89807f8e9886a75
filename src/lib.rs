//! # Product Catalog
//!
//! > **The state core of a single-user product catalog editor.**
//!
//! This crate owns a list of products, the one edit form that may be open over
//! it, and the contract with durable storage. A presentation layer renders the
//! [`SessionView`](session::SessionView) it gets back and forwards user intents as
//! commands; nothing else mutates the catalog.
//!
//! ## 🏗️ Design
//!
//! ### Draft vs. Product
//! Form input is kept as strings in a [`Draft`](model::Draft) until commit, where
//! [`Draft::parse`](model::Draft::parse) either yields typed
//! [`ProductFields`](model::ProductFields) or a
//! [`ValidationError`](model::ValidationError) naming every bad field.
//!
//! ### Full-Overwrite Persistence
//! Storage sits behind the [`ProductStore`](store::ProductStore) trait. It is read
//! once when the session opens and rewritten in full after every create, update
//! and delete. An unreadable blob means "start empty" plus a
//! [`CorruptStateWarning`](store::CorruptStateWarning), never a crash.
//!
//! ### Concurrency Model
//! [`ProductSession`](session::ProductSession) is a plain `&mut self` state
//! machine. [`SessionActor`](actor::SessionActor) runs it in its own Tokio task
//! and processes requests sequentially, so clients can be cloned freely without
//! any locks around the collection.
//!
//! ### Observability
//! Every command is traced with structured fields. See [`lifecycle::tracing`].
//!
//! ## 🗺️ Module Tour
//!
//! - [`model`]: `Product`, `Draft` and the parse step.
//! - [`store`]: the storage seam, a file-backed store and an in-memory store.
//! - [`session`]: the edit-session state machine and its errors.
//! - [`actor`]: the session actor, its client, and mocks for testing clients.
//! - [`lifecycle`]: `CatalogSystem` startup/shutdown and tracing setup.
//! - [`config`]: environment-driven configuration.
//!
//! ## 🚀 Quick Start
//!
//! ```ignore
//! use product_catalog::model::{Draft, DraftField};
//! use product_catalog::session::ProductSession;
//! use product_catalog::store::MemoryStore;
//!
//! let mut session = ProductSession::open(MemoryStore::new());
//! session.begin_create();
//! session.update_draft_field(DraftField::Name, "Widget")?;
//! session.update_draft_field(DraftField::Price, "9.99")?;
//! session.update_draft_field(DraftField::Stock, "5")?;
//! let view = session.commit()?;
//! assert_eq!(view.products.len(), 1);
//! ```
//!
//! ### Running Tests
//!
//! ```bash
//! cargo test
//! ```

pub mod actor;
pub mod config;
pub mod lifecycle;
pub mod model;
pub mod session;
pub mod store;

//! Runtime orchestration: starting and stopping the catalog, and tracing setup.
//!
//! # Main Components
//!
//! - [`CatalogSystem`] - wires config, store and session actor together
//! - [`setup_tracing`] - initializes the tracing/logging infrastructure

pub mod catalog_system;
pub mod tracing;

pub use catalog_system::*;
pub use self::tracing::*;

//! Tokio actor wrapper around the session.
//!
//! # Main Components
//!
//! - [`SessionActor`] - owns a [`ProductSession`](crate::session::ProductSession) in one task
//! - [`SessionClient`] - cloneable command handle
//! - [`SessionRequest`] - the message type between them
//!
//! # Testing
//!
//! See the [`mock`] module for testing client code without a real session.

pub mod core;
pub mod mock;

pub use self::core::*;

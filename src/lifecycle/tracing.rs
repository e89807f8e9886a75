//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter filtered
//! by `RUST_LOG`.
//!
//! ## What Gets Traced
//!
//! - **Session**: open (with collection size) and corrupt-blob warnings
//! - **Commands**: `debug` on receipt with the full draft, `info` on each
//!   successful create/update/delete with the collection size
//! - **Failures**: rejected drafts, unknown ids and failed writes at `warn`
//! - **Actor**: startup and shutdown
//!
//! ## Usage Examples
//!
//! ```bash
//! # Mutations only
//! RUST_LOG=info
//!
//! # Show full drafts
//! RUST_LOG=debug
//!
//! # Only the session
//! RUST_LOG=product_catalog::session=debug
//! ```
//!
//! **With `RUST_LOG=debug`**:
//!
//! ```text
//! INFO Session opened size=0
//! INFO Actor started size=0
//! DEBUG Create draft=Draft { name: "Widget", price: "9.99", description: "", stock: "5", target: None }
//! INFO Created id=1760870400000 size=1
//! DEBUG Saved key=products size=1
//! ```
//!
//! Client spans (`commit`, `delete`, ...) wrap only the send and the wait for
//! the response; events logged inside the actor task carry no span prefix.

/// Initializes the global subscriber. Call once, at startup.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}

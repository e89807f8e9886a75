use tracing::{error, info};

use crate::actor::{SessionActor, SessionClient};
use crate::config::CatalogConfig;
use crate::session::ProductSession;
use crate::store::{FileStore, ProductStore};

/// The runtime orchestrator: storage, session and actor wired together.
///
/// `CatalogSystem` is responsible for:
/// - **Startup**: opening the store and loading the collection once
/// - **Lifecycle Management**: spawning the session actor and stopping it
///
/// # Example
///
/// ```ignore
/// let system = CatalogSystem::start(&CatalogConfig::from_env());
///
/// system.client.begin_create().await?;
/// system.client.set_field(DraftField::Name, "Widget").await?;
/// // ...
/// system.client.commit().await?;
///
/// system.shutdown().await?;
/// ```
pub struct CatalogSystem {
    /// Client for interacting with the session actor
    pub client: SessionClient,

    handle: tokio::task::JoinHandle<()>,
}

impl CatalogSystem {
    /// Opens the file store described by `config` and starts the session actor.
    ///
    /// Must be called inside a Tokio runtime.
    pub fn start(config: &CatalogConfig) -> Self {
        info!(
            dir = %config.storage_dir.display(),
            key = %config.storage_key,
            "Starting catalog"
        );
        let store = FileStore::new(&config.storage_dir, &config.storage_key);
        Self::with_store(store, config.channel_capacity)
    }

    /// Starts the session actor over any store.
    pub fn with_store<S: ProductStore + Send + 'static>(store: S, channel_capacity: usize) -> Self {
        let session = ProductSession::open(store);
        let (actor, client) = SessionActor::new(channel_capacity, session);
        let handle = tokio::spawn(actor.run());
        Self { client, handle }
    }

    /// Gracefully shuts down the session actor.
    ///
    /// Dropping the client closes the channel once every clone handed out has
    /// also been dropped; the actor then leaves its loop.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if the actor shut down cleanly
    /// - `Err(String)` if the actor task panicked
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down catalog...");
        drop(self.client);

        if let Err(e) = self.handle.await {
            error!("Actor task failed: {:?}", e);
            return Err(format!("Actor task failed: {:?}", e));
        }

        info!("Catalog shutdown complete.");
        Ok(())
    }
}

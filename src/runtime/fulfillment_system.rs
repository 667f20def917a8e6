use super::config::{Config, ConfigError};
use crate::catalog::{Catalog, CatalogError};
use crate::clients::{ActorOrderStore, SandboxPrintProvider};
use crate::order_actor::{OrderJournal, OrderRecordError};
use crate::pipeline::SubmissionPipeline;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};

/// Reasons the system cannot come up.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("Failed to load order journal: {0}")]
    Journal(#[from] OrderRecordError),
}

/// The running collaborators of a submission run.
///
/// `FulfillmentSystem` is responsible for:
/// - **Recovery**: replaying the order journal before anything is served
/// - **Lifecycle Management**: spawning the order store and sandbox provider
///   actors, and stopping them again
/// - **Wiring**: handing out clients and assembling the [`SubmissionPipeline`]
///
/// # Example
///
/// ```ignore
/// let config = Config::from_env()?;
/// let catalog = FulfillmentSystem::load_catalog(&config)?;
/// let system = FulfillmentSystem::start(&config).await?;
///
/// let report = system.pipeline(catalog, &config).run().await?;
///
/// system.shutdown().await?;
/// ```
pub struct FulfillmentSystem {
    /// Client for the Order actor
    pub order_store: ActorOrderStore,

    /// Client for the sandbox print job actor
    pub print_provider: SandboxPrintProvider,

    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl FulfillmentSystem {
    /// Reads both catalog documents named by `config`.
    pub fn load_catalog(config: &Config) -> Result<Arc<Catalog>, StartupError> {
        let catalog = Catalog::from_json_files(&config.catalog_path, &config.metadata_path)?;
        info!(editions = catalog.len(), "Catalog loaded");
        Ok(Arc::new(catalog))
    }

    /// Replays the journal and spawns both actors.
    pub async fn start(config: &Config) -> Result<Self, StartupError> {
        if !config.provider_sandbox {
            return Err(ConfigError::ProductionProviderUnavailable.into());
        }

        let journal = OrderJournal::at(&config.store_endpoint);
        let orders = journal.replay().await?;
        info!(
            journal = %config.store_endpoint.display(),
            orders = orders.len(),
            "Order journal replayed"
        );

        let issued_jobs: Vec<_> = orders.iter().filter_map(|o| o.print_job_id).collect();

        let (order_actor, order_store) = crate::order_actor::new(orders)?;
        let order_handle = tokio::spawn(order_actor.run(journal));

        let (job_actor, print_provider) = crate::print_job_actor::new(issued_jobs);
        let job_handle = tokio::spawn(job_actor.run(()));

        Ok(Self {
            order_store,
            print_provider,
            handles: vec![order_handle, job_handle],
        })
    }

    /// A pipeline over this system's clients.
    pub fn pipeline(
        &self,
        catalog: Arc<Catalog>,
        config: &Config,
    ) -> SubmissionPipeline<ActorOrderStore, SandboxPrintProvider> {
        SubmissionPipeline::new(
            self.order_store.clone(),
            self.print_provider.clone(),
            catalog,
            config.payload_settings(),
        )
        .with_policy(config.pipeline_policy())
    }

    /// Drops the clients and waits for both actors to drain.
    ///
    /// Pipelines built from this system hold client clones; drop them first
    /// or the actors never see their channels close.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        drop(self.order_store);
        drop(self.print_provider);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}

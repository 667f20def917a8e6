//! # print-jobs
//!
//! One submission run:
//! 1.  Read [`Config`] from the environment and load the catalog.
//! 2.  Start the [`FulfillmentSystem`] (replays the order journal).
//! 3.  Run the submission pipeline over every `presubmit` order.
//! 4.  Shut the actors down.
//!
//! Individual order failures are logged and counted; the process only exits
//! with an error when it cannot start or cannot fetch the batch.

use print_jobs::runtime::{setup_tracing, Config, FulfillmentSystem};
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = Config::from_env().map_err(|e| e.to_string())?;
    info!(?config, "Starting submission run");

    let catalog = FulfillmentSystem::load_catalog(&config).map_err(|e| e.to_string())?;
    let system = FulfillmentSystem::start(&config)
        .await
        .map_err(|e| e.to_string())?;

    let span = tracing::info_span!("submission_run");
    let result = async {
        let pipeline = system.pipeline(catalog, &config);
        pipeline.run().await
    }
    .instrument(span)
    .await;

    let outcome = match result {
        Ok(report) => {
            info!(
                accepted = report.accepted,
                rejected = report.rejected,
                skipped = report.skipped,
                needs_attention = report.needs_attention,
                "Submission run finished"
            );
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Submission run aborted");
            Err(e.to_string())
        }
    };

    system.shutdown().await?;
    outcome
}

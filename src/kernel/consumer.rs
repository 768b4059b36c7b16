use std::future::Future;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use super::bridge::EventReceiver;
use super::page::RenderContext;
use super::sampler::Sampler;
use crate::config::ObservationConfig;
use crate::error::ObserveError;

/// Observe rotations until `max_events` is reached.
///
/// `on_event(call_index, slide_index)` runs once per confirmed transition, strictly in
/// order and never concurrently with itself. Returns the number of delivered events.
pub async fn observe<C, F, Fut>(
    ctx: Arc<C>,
    config: ObservationConfig,
    on_event: F,
) -> Result<u64, ObserveError>
where
    C: RenderContext,
    F: FnMut(u64, usize) -> Fut,
    Fut: Future<Output = anyhow::Result<()>>,
{
    observe_until(ctx, config, CancellationToken::new(), on_event).await
}

/// Like [`observe`], but also returns (with `Ok`) once `cancel` fires.
///
/// Cancellation is checked while waiting for events; a handler already running is
/// allowed to finish first.
pub async fn observe_until<C, F, Fut>(
    ctx: Arc<C>,
    config: ObservationConfig,
    cancel: CancellationToken,
    on_event: F,
) -> Result<u64, ObserveError>
where
    C: RenderContext,
    F: FnMut(u64, usize) -> Fut,
    Fut: Future<Output = anyhow::Result<()>>,
{
    let (sampler, mut events) = Sampler::start(ctx, &config).await?;
    let session = sampler.session();
    info!(%session, max_events = ?config.max_events, "observing carousel rotations");

    let outcome = drain(&config, &cancel, &mut events, on_event).await;

    // Every exit path stops the loop before reporting.
    sampler.shutdown().await;

    match &outcome {
        Ok(delivered) => info!(%session, delivered, undelivered = events.len(), "observation finished"),
        Err(e) => warn!(%session, "observation aborted: {}", e),
    }
    outcome
}

async fn drain<F, Fut>(
    config: &ObservationConfig,
    cancel: &CancellationToken,
    events: &mut EventReceiver,
    mut on_event: F,
) -> Result<u64, ObserveError>
where
    F: FnMut(u64, usize) -> Fut,
    Fut: Future<Output = anyhow::Result<()>>,
{
    let mut delivered: u64 = 0;

    loop {
        if config.max_events.is_some_and(|max| delivered >= max) {
            return Ok(delivered);
        }

        let slide_index = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Ok(delivered),
            index = events.recv() => index,
        };

        delivered += 1;
        info!(call_index = delivered, slide_index, "rotation settled");

        on_event(delivered, slide_index)
            .await
            .map_err(|source| ObserveError::Handler {
                call_index: delivered,
                source,
            })?;
    }
}

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::bridge::{self, EventReceiver, EventSender};
use super::detector::TransitionDetector;
use super::page::{measure_slide_width, ElementLayout, RenderContext};
use super::time::FrameClock;
use super::transform::parse_translate_x;
use crate::config::ObservationConfig;
use crate::error::ObserveError;

/// Installs the frame-driven sampling loop against a rendering context.
pub struct Sampler;

/// Owner handle for one running sampling loop.
///
/// Dropping the handle stops the loop, so an abandoned session never keeps sampling.
#[derive(Debug)]
pub struct SamplerHandle {
    session: Uuid,
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl Sampler {
    /// Waits for the container, measures it, queues the initial index when asked to,
    /// and starts sampling once per frame.
    pub async fn start<C: RenderContext>(
        ctx: Arc<C>,
        config: &ObservationConfig,
    ) -> Result<(SamplerHandle, EventReceiver), ObserveError> {
        config.validate()?;
        let session = Uuid::new_v4();
        let selector = config.container_selector.clone();

        let layout = wait_for_container(
            ctx.as_ref(),
            &selector,
            config.setup_timeout(),
            config.poll_interval(),
        )
        .await?;

        let slide_width = measure_slide_width(ctx.as_ref(), &selector, &config.slide_selector);
        let initial_offset = parse_translate_x(&layout.transform);
        let detector = TransitionDetector::new(
            config.stable_frames,
            config.velocity_eps,
            slide_width,
            initial_offset,
        );

        let (tx, rx) = bridge::channel(config.poll_interval());
        if config.include_initial {
            tx.push(detector.confirmed_index());
        }

        info!(
            %session,
            selector = %selector,
            slide_width,
            initial_index = detector.confirmed_index(),
            "sampling loop installed"
        );

        let cancel = CancellationToken::new();
        let task = tokio::spawn(run_frames(
            ctx,
            selector,
            detector,
            tx,
            cancel.clone(),
            config.frame_interval(),
            session,
        ));

        Ok((
            SamplerHandle {
                session,
                cancel,
                task: Some(task),
            },
            rx,
        ))
    }
}

impl SamplerHandle {
    pub fn session(&self) -> Uuid {
        self.session
    }

    /// Stops frame scheduling. Idempotent; queued events are left untouched.
    pub fn stop(&self) {
        if !self.cancel.is_cancelled() {
            debug!(session = %self.session, "stopping sampling loop");
        }
        self.cancel.cancel();
    }

    pub fn is_stopped(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Stops the loop and waits for its task to finish.
    pub(crate) async fn shutdown(mut self) {
        self.stop();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                warn!(session = %self.session, "sampling task ended abnormally: {}", e);
            }
        }
    }
}

impl Drop for SamplerHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn wait_for_container<C: RenderContext + ?Sized>(
    ctx: &C,
    selector: &str,
    timeout: Duration,
    poll: Duration,
) -> Result<ElementLayout, ObserveError> {
    let probe = async {
        let mut cadence = interval(poll.max(Duration::from_millis(1)));
        cadence.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            cadence.tick().await;
            if let Some(layout) = ctx.query(selector) {
                return layout;
            }
        }
    };

    tokio::time::timeout(timeout, probe)
        .await
        .map_err(|_| ObserveError::ContainerNotFound {
            selector: selector.to_string(),
            waited: timeout,
        })
}

async fn run_frames<C: RenderContext>(
    ctx: Arc<C>,
    selector: String,
    mut detector: TransitionDetector,
    tx: EventSender,
    cancel: CancellationToken,
    frame_interval: Duration,
    session: Uuid,
) {
    let mut clock = FrameClock::new(frame_interval);

    loop {
        let frame = tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            frame = clock.next_frame() => frame,
        };

        let Some(layout) = ctx.query(&selector) else {
            debug!(%session, frame, "container missing this frame, skipped");
            continue;
        };

        let offset = parse_translate_x(&layout.transform);
        if let Some(index) = detector.observe(offset) {
            debug!(%session, frame, index, offset, "transition confirmed");
            tx.push(index);
        }
    }

    debug!(%session, frames = clock.frames(), "sampling loop stopped");
}

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::ObserveError;
use crate::kernel::time::FRAME_MS;

pub const DEFAULT_CONTAINER: &str = ".carousel-container";
pub const DEFAULT_SLIDE: &str = r#"[data-ui-element-name="hero banner"]"#;

/// Immutable settings for one observation session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ObservationConfig {
    pub container_selector: String,
    /// Preferred slide element under the container, used for width measurement.
    pub slide_selector: String,
    /// Consecutive settled frames required before a transition is confirmed.
    pub stable_frames: u32,
    /// Per-frame offset delta (px) at or below which the widget is at rest.
    pub velocity_eps: f64,
    /// Emit the slide visible at start-up as the first event.
    pub include_initial: bool,
    /// `None` runs until cancelled.
    pub max_events: Option<u64>,
    pub setup_timeout_ms: u64,
    pub frame_interval_ms: u64,
    pub poll_interval_ms: u64,
}

impl Default for ObservationConfig {
    fn default() -> Self {
        Self {
            container_selector: DEFAULT_CONTAINER.to_string(),
            slide_selector: DEFAULT_SLIDE.to_string(),
            stable_frames: 10,
            velocity_eps: 0.5,
            include_initial: true,
            max_events: None,
            setup_timeout_ms: 15_000,
            frame_interval_ms: FRAME_MS,
            poll_interval_ms: FRAME_MS,
        }
    }
}

impl ObservationConfig {
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ObserveError> {
        let path = path.as_ref();
        let load = || -> anyhow::Result<Self> {
            let raw = std::fs::read_to_string(path)?;
            Ok(serde_json::from_str(&raw)?)
        };
        let config = load().map_err(|source| ObserveError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ObserveError> {
        let invalid = |msg: &str| Err(ObserveError::InvalidConfig(msg.to_string()));

        if self.container_selector.trim().is_empty() {
            return invalid("containerSelector must not be empty");
        }
        if self.stable_frames == 0 {
            return invalid("stableFrames must be at least 1");
        }
        if !self.velocity_eps.is_finite() || self.velocity_eps < 0.0 {
            return invalid("velocityEps must be a non-negative number");
        }
        if self.max_events == Some(0) {
            return invalid("maxEvents must be positive when set");
        }
        if self.frame_interval_ms == 0 || self.poll_interval_ms == 0 {
            return invalid("frame and poll intervals must be non-zero");
        }
        Ok(())
    }

    pub fn with_container_selector(mut self, selector: impl Into<String>) -> Self {
        self.container_selector = selector.into();
        self
    }

    pub fn with_stable_frames(mut self, frames: u32) -> Self {
        self.stable_frames = frames;
        self
    }

    pub fn with_velocity_eps(mut self, eps: f64) -> Self {
        self.velocity_eps = eps;
        self
    }

    pub fn with_include_initial(mut self, include: bool) -> Self {
        self.include_initial = include;
        self
    }

    pub fn with_max_events(mut self, max: Option<u64>) -> Self {
        self.max_events = max;
        self
    }

    pub fn with_setup_timeout(mut self, timeout: Duration) -> Self {
        self.setup_timeout_ms = timeout.as_millis() as u64;
        self
    }

    pub fn with_frame_interval(mut self, interval: Duration) -> Self {
        self.frame_interval_ms = interval.as_millis() as u64;
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval_ms = interval.as_millis() as u64;
        self
    }

    pub fn setup_timeout(&self) -> Duration {
        Duration::from_millis(self.setup_timeout_ms)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

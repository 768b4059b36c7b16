use std::time::Duration;
use tokio::time::Instant;

use crate::config::{DEFAULT_CONTAINER, DEFAULT_SLIDE};
use crate::kernel::page::{ElementLayout, RenderContext};

/// Animation timing of the simulated carousel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarouselTiming {
    /// Time spent resting on each slide.
    pub dwell: Duration,
    /// Time spent moving to the next slide.
    pub travel: Duration,
    /// Back-easing strength; `0.0` means no overshoot.
    pub overshoot: f64,
}

impl Default for CarouselTiming {
    fn default() -> Self {
        Self {
            dwell: Duration::from_millis(3000),
            travel: Duration::from_millis(600),
            overshoot: 0.0,
        }
    }
}

/// An auto-advancing carousel living on the tokio clock.
///
/// It answers layout queries the way a page would: the container carries a
/// `matrix(...)` transform and the slides sit under it.
#[derive(Debug, Clone)]
pub struct SimulatedCarousel {
    container_selector: String,
    slide_selector: String,
    slides: usize,
    slide_width: f64,
    timing: CarouselTiming,
    started: Instant,
}

impl SimulatedCarousel {
    pub fn new(slides: usize, slide_width: f64, timing: CarouselTiming) -> Self {
        Self {
            container_selector: DEFAULT_CONTAINER.to_string(),
            slide_selector: DEFAULT_SLIDE.to_string(),
            slides: slides.max(1),
            slide_width,
            timing,
            started: Instant::now(),
        }
    }

    pub fn with_container_selector(mut self, selector: impl Into<String>) -> Self {
        self.container_selector = selector.into();
        self
    }

    pub fn slide_count(&self) -> usize {
        self.slides
    }

    pub fn slide_width(&self) -> f64 {
        self.slide_width
    }

    /// Current horizontal translation of the container (px, non-positive while resting).
    pub fn visible_offset(&self) -> f64 {
        self.offset_at(self.started.elapsed())
    }

    /// Slide expected to be resting in view at `elapsed` after start.
    pub fn resting_slide_at(&self, elapsed: Duration) -> usize {
        let cycle = self.cycle().as_nanos().max(1);
        ((elapsed.as_nanos() / cycle) as usize) % self.slides
    }

    fn cycle(&self) -> Duration {
        self.timing.dwell + self.timing.travel
    }

    fn offset_at(&self, elapsed: Duration) -> f64 {
        if self.slides <= 1 {
            return 0.0;
        }

        let cycle = self.cycle().as_nanos().max(1);
        let within = elapsed.as_nanos() % cycle;
        let from = self.resting_slide_at(elapsed);
        let to = (from + 1) % self.slides;

        let dwell = self.timing.dwell.as_nanos();
        let position = if within < dwell || self.timing.travel.is_zero() {
            from as f64
        } else {
            let t = (within - dwell) as f64 / self.timing.travel.as_nanos() as f64;
            let progress = ease_out_back(t.clamp(0.0, 1.0), self.timing.overshoot);
            from as f64 + (to as f64 - from as f64) * progress
        };

        -(position * self.slide_width)
    }
}

/// Cubic ease-out; `overshoot > 0` pushes past the target before settling.
fn ease_out_back(t: f64, overshoot: f64) -> f64 {
    let c1 = 1.70158 * overshoot;
    let c3 = c1 + 1.0;
    let u = t - 1.0;
    1.0 + c3 * u.powi(3) + c1 * u.powi(2)
}

impl RenderContext for SimulatedCarousel {
    fn query(&self, selector: &str) -> Option<ElementLayout> {
        if selector == self.container_selector {
            return Some(ElementLayout {
                transform: format!("matrix(1, 0, 0, 1, {:.3}, 0)", self.visible_offset()),
                width: self.slide_width * self.slides as f64,
                first_child_width: Some(self.slide_width),
            });
        }
        if selector == format!("{} {}", self.container_selector, self.slide_selector) {
            return Some(ElementLayout {
                transform: "none".to_string(),
                width: self.slide_width,
                first_child_width: None,
            });
        }
        None
    }
}

use anyhow::{anyhow, Context, Result};
use image::{Rgb, RgbImage, RgbaImage};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

use crate::sim::SimulatedCarousel;

/// Destination for "capture what is on screen now" requests.
///
/// Capturing is blocking I/O; async callers should go through `spawn_blocking`.
pub trait ScreenshotSink: Send + Sync {
    /// Captures the current visual state into `<out_dir>/<name>.png`.
    fn capture(&self, name: &str) -> Result<PathBuf>;
}

fn prepare_dir(dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory {}", dir.display()))?;
    Ok(dir.to_path_buf())
}

/// Captures the primary monitor, dropping `top_offset` rows (browser chrome, extension bars).
#[derive(Debug, Clone)]
pub struct ScreenSink {
    out_dir: PathBuf,
    top_offset: u32,
}

impl ScreenSink {
    pub fn new(out_dir: impl AsRef<Path>, top_offset: u32) -> Result<Self> {
        Ok(Self {
            out_dir: prepare_dir(out_dir.as_ref())?,
            top_offset,
        })
    }
}

impl ScreenshotSink for ScreenSink {
    fn capture(&self, name: &str) -> Result<PathBuf> {
        let monitors = xcap::Monitor::all().map_err(|e| anyhow!("failed to list monitors: {}", e))?;
        let monitor = monitors
            .iter()
            .find(|m| m.is_primary())
            .or_else(|| monitors.first())
            .ok_or_else(|| anyhow!("no monitor available for capture"))?;

        let shot = monitor
            .capture_image()
            .map_err(|e| anyhow!("screen capture failed: {}", e))?;

        // Re-home the pixels into our own image buffer before editing them.
        let (width, height) = (shot.width(), shot.height());
        let frame = RgbaImage::from_raw(width, height, shot.into_raw())
            .ok_or_else(|| anyhow!("capture returned a malformed {}x{} buffer", width, height))?;
        let frame = crop_top(&frame, self.top_offset);

        let path = self.out_dir.join(format!("{}.png", name));
        frame
            .save(&path)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!("screenshot saved: {}", path.display());
        Ok(path)
    }
}

/// Drops the first `rows` rows. A crop that would leave nothing keeps the full frame.
pub fn crop_top(frame: &RgbaImage, rows: u32) -> RgbaImage {
    if rows == 0 || rows >= frame.height() {
        return frame.clone();
    }
    image::imageops::crop_imm(frame, 0, rows, frame.width(), frame.height() - rows).to_image()
}

const PALETTE: [[u8; 3]; 6] = [
    [231, 76, 60],
    [46, 204, 113],
    [52, 152, 219],
    [241, 196, 15],
    [155, 89, 182],
    [26, 188, 156],
];

/// Paints the simulated carousel's viewport, one flat colour per slide.
#[derive(Debug, Clone)]
pub struct RenderedSink {
    out_dir: PathBuf,
    carousel: Arc<SimulatedCarousel>,
    height: u32,
}

impl RenderedSink {
    pub fn new(out_dir: impl AsRef<Path>, carousel: Arc<SimulatedCarousel>, height: u32) -> Result<Self> {
        Ok(Self {
            out_dir: prepare_dir(out_dir.as_ref())?,
            carousel,
            height: height.max(1),
        })
    }

    /// Viewport image at the carousel's current offset.
    pub fn render(&self) -> RgbImage {
        let slide_width = self.carousel.slide_width().max(1.0);
        let slides = self.carousel.slide_count();
        let offset = self.carousel.visible_offset();
        let width = slide_width.round().max(1.0) as u32;

        RgbImage::from_fn(width, self.height, |x, _| {
            let content_x = (x as f64 - offset).max(0.0);
            slide_colour((content_x / slide_width).floor() as usize % slides)
        })
    }
}

impl ScreenshotSink for RenderedSink {
    fn capture(&self, name: &str) -> Result<PathBuf> {
        let path = self.out_dir.join(format!("{}.png", name));
        self.render()
            .save(&path)
            .with_context(|| format!("failed to write {}", path.display()))?;
        debug!("rendered frame saved: {}", path.display());
        Ok(path)
    }
}

/// Colour the rendered sink uses for `slide`.
pub fn slide_colour(slide: usize) -> Rgb<u8> {
    Rgb(PALETTE[slide % PALETTE.len()])
}

use tracing::warn;

/// Layout read back from the rendering context for one element.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ElementLayout {
    /// Computed CSS `transform`, e.g. `"none"` or `"matrix(1, 0, 0, 1, -200, 0)"`.
    pub transform: String,
    /// Rendered width in px.
    pub width: f64,
    /// Rendered width of the first element child, when there is one.
    pub first_child_width: Option<f64>,
}

/// The page-side environment the sampling loop runs against.
///
/// Reads are synchronous: the loop samples once per frame and never awaits the host.
pub trait RenderContext: Send + Sync + 'static {
    /// Layout of the first element matching `selector`, or `None` when absent.
    fn query(&self, selector: &str) -> Option<ElementLayout>;
}

/// Width of one slide, measured once at session start.
///
/// Prefers the marked slide element, then the container's first child, then the
/// container itself. Unmeasurable widths degrade to `1.0`.
pub fn measure_slide_width<C: RenderContext + ?Sized>(
    ctx: &C,
    container: &str,
    slide_selector: &str,
) -> f64 {
    let usable = |w: f64| w.is_finite() && w > 0.0;

    let marked = if slide_selector.trim().is_empty() {
        None
    } else {
        ctx.query(&format!("{container} {slide_selector}"))
            .map(|layout| layout.width)
    };

    let layout = ctx.query(container);
    let candidates = [
        marked,
        layout.as_ref().and_then(|l| l.first_child_width),
        layout.as_ref().map(|l| l.width),
    ];

    match candidates.into_iter().flatten().find(|w| usable(*w)) {
        Some(width) => width,
        None => {
            warn!(container, "slide width unmeasurable, falling back to 1px slides");
            1.0
        }
    }
}

pub mod screenshot;

pub use screenshot::{crop_top, slide_colour, RenderedSink, ScreenSink, ScreenshotSink};

use std::sync::{Arc, Mutex};
use std::time::Duration;

use carousel_watch::kernel::page::measure_slide_width;
use carousel_watch::kernel::transform::parse_translate_x;
use carousel_watch::outputs::{crop_top, slide_colour, RenderedSink, ScreenshotSink};
use carousel_watch::sim::{CarouselTiming, SimulatedCarousel};
use carousel_watch::{observe, ObservationConfig, RenderContext};

fn timing(overshoot: f64) -> CarouselTiming {
    CarouselTiming {
        dwell: Duration::from_millis(1000),
        travel: Duration::from_millis(300),
        overshoot,
    }
}

#[tokio::test(start_paused = true)]
async fn test_carousel_offsets_follow_timeline() {
    let carousel = SimulatedCarousel::new(3, 400.0, timing(0.0));
    assert_eq!(carousel.visible_offset(), 0.0);

    tokio::time::advance(Duration::from_millis(1150)).await;
    let moving = carousel.visible_offset();
    assert!(moving < 0.0 && moving > -400.0, "mid-travel offset was {}", moving);

    tokio::time::advance(Duration::from_millis(200)).await;
    assert_eq!(carousel.visible_offset(), -400.0);
    assert_eq!(carousel.resting_slide_at(Duration::from_millis(1350)), 1);
}

#[tokio::test(start_paused = true)]
async fn test_carousel_answers_layout_queries() {
    let carousel = SimulatedCarousel::new(4, 320.0, timing(0.0));

    let layout = carousel.query(".carousel-container").unwrap();
    assert_eq!(parse_translate_x(&layout.transform), 0.0);
    assert_eq!(layout.first_child_width, Some(320.0));
    assert!(carousel.query(".something-else").is_none());

    let width = measure_slide_width(&carousel, ".carousel-container", r#"[data-ui-element-name="hero banner"]"#);
    assert_eq!(width, 320.0);
}

async fn watch(carousel: SimulatedCarousel, max: u64) -> Vec<(u64, usize)> {
    let calls: Arc<Mutex<Vec<(u64, usize)>>> = Arc::default();
    let sink = calls.clone();
    let config = ObservationConfig::default().with_max_events(Some(max));

    observe(Arc::new(carousel), config, move |call, slide| {
        let sink = sink.clone();
        async move {
            sink.lock().unwrap().push((call, slide));
            Ok::<(), anyhow::Error>(())
        }
    })
    .await
    .unwrap();

    let calls = calls.lock().unwrap().clone();
    calls
}

#[tokio::test(start_paused = true)]
async fn test_observes_each_slide_once_including_wrap() {
    let calls = watch(SimulatedCarousel::new(3, 400.0, timing(0.0)), 5).await;
    assert_eq!(calls, vec![(1, 0), (2, 1), (3, 2), (4, 0), (5, 1)]);
}

#[tokio::test(start_paused = true)]
async fn test_overshoot_does_not_duplicate_events() {
    let calls = watch(SimulatedCarousel::new(3, 400.0, timing(1.0)), 4).await;
    assert_eq!(calls, vec![(1, 0), (2, 1), (3, 2), (4, 0)]);
}

#[tokio::test(start_paused = true)]
async fn test_rendered_sink_paints_visible_slide() {
    let dir = tempfile::tempdir().unwrap();
    let carousel = Arc::new(SimulatedCarousel::new(3, 64.0, timing(0.0)));
    let sink = RenderedSink::new(dir.path().join("banners"), carousel.clone(), 8).unwrap();

    let first = sink.capture("banner_1").unwrap();
    assert!(first.ends_with("banners/banner_1.png"));
    let img = image::open(&first).unwrap().to_rgb8();
    assert_eq!(img.dimensions(), (64, 8));
    assert_eq!(*img.get_pixel(0, 0), slide_colour(0));
    assert_eq!(*img.get_pixel(63, 7), slide_colour(0));

    // Rest on the second slide.
    tokio::time::advance(Duration::from_millis(1400)).await;
    let second = sink.capture("banner_2").unwrap();
    let img = image::open(&second).unwrap().to_rgb8();
    assert_eq!(*img.get_pixel(10, 3), slide_colour(1));
}

#[test]
fn test_crop_top_drops_header_rows() {
    let frame = image::RgbaImage::from_fn(4, 10, |_, y| image::Rgba([y as u8, 0, 0, 255]));

    let cropped = crop_top(&frame, 3);
    assert_eq!(cropped.dimensions(), (4, 7));
    assert_eq!(cropped.get_pixel(0, 0)[0], 3);

    assert_eq!(crop_top(&frame, 0).dimensions(), (4, 10));
    assert_eq!(crop_top(&frame, 10).dimensions(), (4, 10));
}

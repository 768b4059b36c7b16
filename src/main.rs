use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use carousel_watch::outputs::{RenderedSink, ScreenSink, ScreenshotSink};
use carousel_watch::sim::{CarouselTiming, SimulatedCarousel};
use carousel_watch::{observe_until, ObservationConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SinkKind {
    /// Paint the simulated viewport.
    Render,
    /// Grab the primary monitor.
    Screen,
}

/// Capture every settled slide of an auto-advancing carousel.
#[derive(Debug, Parser)]
#[command(name = "carousel-watch", version)]
struct Args {
    /// JSON observation config; CLI flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    max_events: Option<u64>,
    #[arg(long)]
    stable_frames: Option<u32>,
    #[arg(long)]
    velocity_eps: Option<f64>,
    /// Do not report the slide visible at start-up.
    #[arg(long)]
    no_initial: bool,

    #[arg(long, default_value = "banners")]
    out_dir: PathBuf,
    #[arg(long, value_enum, default_value_t = SinkKind::Render)]
    sink: SinkKind,
    /// Rows to cut from the top of screen captures.
    #[arg(long, default_value_t = 0)]
    top_offset: u32,

    #[arg(long, default_value_t = 5)]
    slides: usize,
    #[arg(long, default_value_t = 1280.0)]
    slide_width: f64,
    #[arg(long, default_value_t = 3000)]
    dwell_ms: u64,
    #[arg(long, default_value_t = 600)]
    travel_ms: u64,
    #[arg(long, default_value_t = 0.0)]
    overshoot: f64,
}

impl Args {
    fn observation_config(&self) -> anyhow::Result<ObservationConfig> {
        let mut config = match &self.config {
            Some(path) => ObservationConfig::from_json_file(path)?,
            None => ObservationConfig::default(),
        };
        if self.max_events.is_some() {
            config = config.with_max_events(self.max_events);
        }
        if let Some(frames) = self.stable_frames {
            config = config.with_stable_frames(frames);
        }
        if let Some(eps) = self.velocity_eps {
            config = config.with_velocity_eps(eps);
        }
        if self.no_initial {
            config = config.with_include_initial(false);
        }
        config.validate()?;
        Ok(config)
    }
}

async fn capture_slide(
    sink: Arc<dyn ScreenshotSink>,
    call_index: u64,
    slide_index: usize,
) -> anyhow::Result<()> {
    let name = format!("banner_{}", call_index);
    let path = tokio::task::spawn_blocking(move || sink.capture(&name)).await??;
    info!(call_index, slide_index, path = %path.display(), "slide captured");
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();
    let config = args.observation_config()?;

    let timing = CarouselTiming {
        dwell: Duration::from_millis(args.dwell_ms),
        travel: Duration::from_millis(args.travel_ms),
        overshoot: args.overshoot,
    };
    let carousel = Arc::new(
        SimulatedCarousel::new(args.slides, args.slide_width, timing)
            .with_container_selector(config.container_selector.clone()),
    );

    let sink: Arc<dyn ScreenshotSink> = match args.sink {
        SinkKind::Render => Arc::new(RenderedSink::new(&args.out_dir, carousel.clone(), 200)?),
        SinkKind::Screen => Arc::new(ScreenSink::new(&args.out_dir, args.top_offset)?),
    };

    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("interrupt received, stopping observation");
                cancel.cancel();
            }
        });
    }

    info!(slides = args.slides, out_dir = %args.out_dir.display(), "carousel watch starting");
    let delivered = observe_until(carousel, config, cancel, move |call_index, slide_index| {
        capture_slide(sink.clone(), call_index, slide_index)
    })
    .await?;

    info!(delivered, "carousel watch finished");
    Ok(())
}

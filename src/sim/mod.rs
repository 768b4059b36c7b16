pub mod carousel;

pub use carousel::{CarouselTiming, SimulatedCarousel};

pub mod bridge;
pub mod consumer;
pub mod detector;
pub mod page;
pub mod sampler;
pub mod time;
pub mod transform;

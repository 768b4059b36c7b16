pub mod config;
pub mod error;
pub mod kernel;
pub mod outputs;
pub mod sim;

pub use config::ObservationConfig;
pub use error::ObserveError;
pub use kernel::consumer::{observe, observe_until};
pub use kernel::page::{ElementLayout, RenderContext};
pub use kernel::sampler::{Sampler, SamplerHandle};

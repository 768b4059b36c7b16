use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ObserveError {
    /// SetupFailure: the widget root never showed up, nothing was sampled.
    #[error("carousel container `{selector}` not found within {waited:?}")]
    ContainerNotFound { selector: String, waited: Duration },

    #[error("invalid observation config: {0}")]
    InvalidConfig(String),

    #[error("failed to load observation config from {path}")]
    Config {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    /// The user handler failed. The sampling loop is already stopped when this is returned.
    #[error("transition handler failed on event #{call_index}")]
    Handler {
        call_index: u64,
        #[source]
        source: anyhow::Error,
    },
}

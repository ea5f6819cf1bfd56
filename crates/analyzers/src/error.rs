use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("Analyzer received invalid parameters: {0}")]
    InvalidParameters(String),

    #[error(transparent)]
    Event(#[from] events::EventError),

    #[error(transparent)]
    Core(#[from] core_types::CoreError),

    #[error("Store record has no collection named '{0}'")]
    MissingStoreCollection(String),

    #[error("Particle {index} of '{collection}' has no isolation; run an isolation analyzer first")]
    MissingIsolation { collection: String, index: usize },

    #[error("Failed to build analyzer '{analyzer}': {source}")]
    Build {
        analyzer: String,
        #[source]
        source: Box<AnalyzerError>,
    },
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LooperError {
    #[error("Event source error: {0}")]
    Source(#[from] event_store::SourceError),

    #[error("Failed to build the analyzer sequence: {0}")]
    Build(#[from] analyzers::AnalyzerError),

    #[error("Analyzer '{analyzer}' failed on event {iev} of component '{component}': {source}")]
    Analyzer {
        analyzer: String,
        component: String,
        iev: u64,
        #[source]
        source: analyzers::AnalyzerError,
    },

    #[error("Progress bar template error: {0}")]
    ProgressBarTemplate(String),
}

impl From<indicatif::style::TemplateError> for LooperError {
    fn from(error: indicatif::style::TemplateError) -> Self {
        LooperError::ProgressBarTemplate(error.to_string())
    }
}

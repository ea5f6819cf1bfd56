use crate::error::ConfigError;
use crate::settings::{AnalyzerConfig, Logging};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

/// Name of the span every analyzer call runs in. Per-analyzer directives match on it.
pub const ANALYZER_SPAN: &str = "analyzer";

/// Builds the log filter: `RUST_LOG` if set, otherwise [`settings_filter`].
pub fn build_filter(logging: &Logging, sequence: &[AnalyzerConfig]) -> Result<EnvFilter, ConfigError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => settings_filter(logging, sequence),
    }
}

/// The configured level plus one `[analyzer{name=..}]=level` directive per analyzer
/// with its own `log_level`, parsed as a single `RUST_LOG`-style string.
pub fn settings_filter(logging: &Logging, sequence: &[AnalyzerConfig]) -> Result<EnvFilter, ConfigError> {
    check_levels(logging, sequence)?;

    let directives: Vec<String> = std::iter::once(logging.level.clone())
        .chain(sequence.iter().filter_map(|analyzer| {
            analyzer
                .log_level
                .as_ref()
                .map(|level| analyzer_directive(&analyzer.name, level))
        }))
        .collect();

    let joined = directives.join(",");
    EnvFilter::try_new(&joined).map_err(|e| ConfigError::Logging(format!("invalid filter '{}': {}", joined, e)))
}

/// Checks that every configured level parses, without installing anything.
pub(crate) fn check_levels(logging: &Logging, sequence: &[AnalyzerConfig]) -> Result<(), ConfigError> {
    EnvFilter::try_new(&logging.level)
        .map_err(|e| ConfigError::Logging(format!("invalid level '{}': {}", logging.level, e)))?;
    for analyzer in sequence {
        if let Some(level) = &analyzer.log_level {
            analyzer_directive(&analyzer.name, level)
                .parse::<Directive>()
                .map_err(|e| {
                    ConfigError::Logging(format!(
                        "invalid log_level '{}' for analyzer '{}': {}",
                        level, analyzer.name, e
                    ))
                })?;
        }
    }
    Ok(())
}

fn analyzer_directive(name: &str, level: &str) -> String {
    format!("[{}{{name={}}}]={}", ANALYZER_SPAN, name, level)
}

/// Installs the global subscriber: stderr always, plus a daily rolling file when
/// `logging.directory` is set.
///
/// The returned guard flushes the file writer on drop and must be kept alive for the
/// duration of the run.
pub fn init_logging(
    logging: &Logging,
    sequence: &[AnalyzerConfig],
) -> Result<Option<WorkerGuard>, ConfigError> {
    let filter = build_filter(logging, sequence)?;

    let (file_layer, guard) = match &logging.directory {
        Some(directory) => {
            let appender = tracing_appender::rolling::daily(directory, "hepflow.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(file_layer)
        .try_init()
        .map_err(|e| ConfigError::Logging(e.to_string()))?;
    tracing::debug!(directory = ?logging.directory, "Logging initialized");

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{AnalyzerKind, ResonanceBuilderParams};
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Captured {
        type Writer = Captured;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn analyzer(name: &str, log_level: Option<&str>) -> AnalyzerConfig {
        AnalyzerConfig {
            name: name.to_string(),
            log_level: log_level.map(str::to_string),
            kind: AnalyzerKind::ResonanceBuilder(ResonanceBuilderParams {
                output: name.to_string(),
                leg_collection: "leptons".to_string(),
                pdgid: 23,
            }),
        }
    }

    #[test]
    fn analyzer_log_level_applies_inside_its_span_only() {
        let logging = Logging::default();
        let sequence = [analyzer("iso_leptons", Some("info")), analyzer("zeds", None)];
        let filter = settings_filter(&logging, &sequence).unwrap();

        let captured = Captured::default();
        let subscriber = tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(captured.clone()).with_ansi(false));

        tracing::subscriber::with_default(subscriber, || {
            {
                let span = tracing::info_span!("analyzer", name = "iso_leptons");
                let _entered = span.enter();
                tracing::info!("isolation computed");
            }
            {
                let span = tracing::info_span!("analyzer", name = "zeds");
                let _entered = span.enter();
                tracing::info!("candidates built");
            }
            tracing::info!("outside any analyzer");
            tracing::warn!("global warning");
        });

        let text = captured.text();
        assert!(text.contains("isolation computed"));
        assert!(!text.contains("candidates built"));
        assert!(!text.contains("outside any analyzer"));
        assert!(text.contains("global warning"));
    }

    #[test]
    fn invalid_analyzer_level_is_a_logging_error() {
        let logging = Logging::default();
        let err = settings_filter(&logging, &[analyzer("zeds", Some("loud"))]).unwrap_err();
        assert!(matches!(err, ConfigError::Logging(msg) if msg.contains("zeds")));
    }
}

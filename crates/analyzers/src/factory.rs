use crate::Analyzer;
use crate::error::AnalyzerError;
use crate::isolation::IsolationAnalyzer;
use crate::reader::Reader;
use crate::recoil_builder::RecoilBuilder;
use crate::resonance_builder::ResonanceBuilder;
use crate::selector::Selector;
use configuration::{AnalyzerConfig, AnalyzerKind, RunContext};

/// Creates a new analyzer instance from its configuration entry.
pub fn create_analyzer(
    config: &AnalyzerConfig,
    context: &RunContext,
) -> Result<Box<dyn Analyzer>, AnalyzerError> {
    let name = config.name.clone();
    // The compiler will error if a new AnalyzerKind is added but not handled here.
    let analyzer: Box<dyn Analyzer> = match &config.kind {
        AnalyzerKind::Reader(params) => Box::new(Reader::new(name, params.clone())?),
        AnalyzerKind::Selector(params) => Box::new(Selector::new(name, params.clone())?),
        AnalyzerKind::Isolation(params) => Box::new(IsolationAnalyzer::new(name, params.clone())?),
        AnalyzerKind::ResonanceBuilder(params) => {
            Box::new(ResonanceBuilder::new(name, params.clone())?)
        }
        AnalyzerKind::RecoilBuilder(params) => {
            Box::new(RecoilBuilder::new(name, params.clone(), context)?)
        }
    };
    Ok(analyzer)
}

/// Builds the whole sequence, in order. The first failure is reported with the name of
/// the analyzer that caused it.
pub fn create_sequence(
    configs: &[AnalyzerConfig],
    context: &RunContext,
) -> Result<Vec<Box<dyn Analyzer>>, AnalyzerError> {
    configs
        .iter()
        .map(|config| {
            create_analyzer(config, context).map_err(|e| AnalyzerError::Build {
                analyzer: config.name.clone(),
                source: Box::new(e),
            })
        })
        .collect()
}

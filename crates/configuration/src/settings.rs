use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::path::PathBuf;

use crate::error::ConfigError;

/// The root configuration structure for an analysis run.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Seed for every random number generator used during the run.
    #[serde(default)]
    pub random_seed: u64,
    pub collider: Collider,
    #[serde(default)]
    pub logging: Logging,
    #[serde(default)]
    pub looper: LooperSettings,
    pub components: Vec<Component>,
    /// The analyzers, in the order they process each event.
    pub sequence: Vec<AnalyzerConfig>,
}

impl Settings {
    /// Checks the semantic constraints that deserialization alone cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.collider.sqrts > 0.0) {
            return Err(ConfigError::ValidationError(format!(
                "collider.sqrts must be positive, got {}",
                self.collider.sqrts
            )));
        }
        if self.components.is_empty() {
            return Err(ConfigError::ValidationError(
                "at least one component must be declared".to_string(),
            ));
        }
        for component in &self.components {
            if component.files.is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "component '{}' has no input files",
                    component.name
                )));
            }
        }
        if self.sequence.is_empty() {
            return Err(ConfigError::ValidationError(
                "the analyzer sequence is empty".to_string(),
            ));
        }
        let mut seen = HashSet::new();
        for analyzer in &self.sequence {
            if !seen.insert(analyzer.name.as_str()) {
                return Err(ConfigError::ValidationError(format!(
                    "analyzer name '{}' is used more than once",
                    analyzer.name
                )));
            }
        }
        crate::logging::check_levels(&self.logging, &self.sequence)
            .map_err(|e| match e {
                ConfigError::Logging(msg) => ConfigError::ValidationError(msg),
                other => other,
            })?;
        Ok(())
    }

    /// The process-wide parameters handed to every analyzer at construction.
    pub fn context(&self) -> RunContext {
        RunContext {
            collider: self.collider.clone(),
            random_seed: self.random_seed,
        }
    }
}

/// Process-wide parameters, built once at startup and passed by reference.
#[derive(Debug, Clone, PartialEq)]
pub struct RunContext {
    pub collider: Collider,
    pub random_seed: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Beams {
    /// Electron-positron collisions.
    Ee,
    /// Proton-proton collisions.
    Pp,
}

/// Definition of the collider the events were produced at.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Collider {
    pub beams: Beams,
    /// Centre-of-mass energy in GeV.
    pub sqrts: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Logging {
    /// Default verbosity (`error`, `warn`, `info`, `debug`, `trace`). `RUST_LOG` wins if set.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// If set, logs are also written to a daily rolling file in this directory.
    #[serde(default)]
    pub directory: Option<PathBuf>,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: None,
        }
    }
}

/// What the looper does when an analyzer fails on an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorPolicy {
    /// Stop the run and report the error.
    #[default]
    Abort,
    /// Drop the event, log a warning, and continue with the next one.
    SkipEvent,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LooperSettings {
    #[serde(default)]
    pub on_error: ErrorPolicy,
    /// Total number of events to process across all components.
    #[serde(default)]
    pub max_events: Option<u64>,
    /// Number of events to skip at the start of each component.
    #[serde(default)]
    pub first_event: u64,
}

/// A named set of input files processed as one loop.
#[derive(Debug, Clone, Deserialize)]
pub struct Component {
    pub name: String,
    pub files: Vec<PathBuf>,
}

/// One entry of the analyzer sequence.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzerConfig {
    /// Unique instance name, used in logs and in the run summary.
    pub name: String,
    /// Verbosity override for this analyzer only.
    #[serde(default)]
    pub log_level: Option<String>,
    #[serde(flatten)]
    pub kind: AnalyzerKind,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnalyzerKind {
    Reader(ReaderParams),
    Selector(SelectorParams),
    Isolation(IsolationParams),
    ResonanceBuilder(ResonanceBuilderParams),
    RecoilBuilder(RecoilBuilderParams),
}

impl AnalyzerKind {
    pub fn label(&self) -> &'static str {
        match self {
            AnalyzerKind::Reader(_) => "reader",
            AnalyzerKind::Selector(_) => "selector",
            AnalyzerKind::Isolation(_) => "isolation",
            AnalyzerKind::ResonanceBuilder(_) => "resonance_builder",
            AnalyzerKind::RecoilBuilder(_) => "recoil_builder",
        }
    }
}

/// Parameters for the store reader.
#[derive(Debug, Clone, Deserialize)]
pub struct ReaderParams {
    /// Event attribute name -> collection name in the store record.
    pub collections: BTreeMap<String, String>,
}

/// Parameters for the particle selector.
#[derive(Debug, Clone, Deserialize)]
pub struct SelectorParams {
    pub output: String,
    pub input_objects: String,
    #[serde(default)]
    pub filter: ParticleFilter,
}

/// Declarative particle selection. Every criterion that is set must hold.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ParticleFilter {
    /// Keep particles with `e > min_energy`.
    #[serde(default)]
    pub min_energy: Option<f64>,
    /// Keep particles with `pt > min_pt`.
    #[serde(default)]
    pub min_pt: Option<f64>,
    /// Keep particles whose |pdgid| is in this list.
    #[serde(default)]
    pub abs_pdgids: Option<Vec<i32>>,
    /// Keep particles with this generator status.
    #[serde(default)]
    pub status: Option<i32>,
    /// Keep particles with relative isolation below this value.
    #[serde(default)]
    pub max_rel_iso: Option<f64>,
}

/// Parameters for the lepton isolation analyzer.
#[derive(Debug, Clone, Deserialize)]
pub struct IsolationParams {
    pub leptons: String,
    pub particles: String,
    pub iso_area: IsoArea,
}

/// The region around a particle in which the isolation sums are computed.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum IsoArea {
    /// A cone of radius `radius` in the (η, φ) plane.
    EtaPhiCircle { radius: f64 },
}

/// Parameters for the resonance builder.
#[derive(Debug, Clone, Deserialize)]
pub struct ResonanceBuilderParams {
    pub output: String,
    pub leg_collection: String,
    /// Pdgid of the target resonance: 23 (Z), 24 (W) or 25 (Higgs).
    pub pdgid: i32,
}

/// Parameters for the recoil builder.
#[derive(Debug, Clone, Deserialize)]
pub struct RecoilBuilderParams {
    pub output: String,
    /// Resonance collection whose first element recoils.
    pub object: String,
}

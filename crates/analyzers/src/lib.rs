//! # Analyzers
//!
//! The per-event processing steps of an analysis. This crate defines the `Analyzer`
//! trait and its concrete implementations.
//!
//! ## Architectural Principles
//!
//! - **Pure logic:** Analyzers know nothing about files or the event loop. They read
//!   named collections from an `Event` and publish their results under the names
//!   given in their configuration.
//! - **Sequence agnostic driver:** The looper runs any `Box<dyn Analyzer>` without
//!   knowing what it does.
//! - **Extensibility:** Adding an analyzer means a new module, an `Analyzer` impl, a
//!   variant in `configuration::AnalyzerKind` and an arm in the `factory`.

// Declare all the modules that constitute this crate.
pub mod error;
pub mod factory;
pub mod isolation;
pub mod reader;
pub mod recoil_builder;
pub mod resonance_builder;
pub mod selector;

#[cfg(test)]
pub(crate) mod testing;

// Re-export the key components to create a clean, public-facing API.
pub use error::AnalyzerError;
pub use factory::{create_analyzer, create_sequence};
pub use isolation::IsolationAnalyzer;
pub use reader::Reader;
pub use recoil_builder::RecoilBuilder;
pub use resonance_builder::{ResonanceBuilder, build_resonances};
pub use selector::Selector;

use events::Event;

/// The core trait that all analyzers implement.
///
/// `process` takes `&mut self` so analyzers can keep counters across events, and
/// `&mut Event` because publishing results is the whole point of an analyzer.
pub trait Analyzer {
    /// The instance name from the configuration.
    fn name(&self) -> &str;

    /// Called before the first event of each component.
    fn begin_loop(&mut self, _component: &str) {}

    /// Processes one event.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - the analyzer's outputs have been published on the event.
    /// * `Err(AnalyzerError)` - the event cannot be processed; the remaining analyzers
    ///   of the sequence are not run for it.
    fn process(&mut self, event: &mut Event) -> Result<(), AnalyzerError>;

    /// Called after the last event of each component.
    fn end_loop(&mut self) {}
}

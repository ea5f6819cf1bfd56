use crate::Analyzer;
use crate::error::AnalyzerError;
use configuration::{ParticleFilter, SelectorParams};
use core_types::{Particle, ParticleRef};
use events::Event;

/// Copies the particles of `input_objects` that pass a filter into `output`.
///
/// The selection keeps the input order and shares the particles with the input
/// collection.
pub struct Selector {
    name: String,
    output: String,
    input_objects: String,
    filter: ParticleFilter,
    seen: u64,
    selected: u64,
}

impl Selector {
    pub fn new(name: String, params: SelectorParams) -> Result<Self, AnalyzerError> {
        let filter = &params.filter;
        for (label, value) in [
            ("min_energy", filter.min_energy),
            ("min_pt", filter.min_pt),
            ("max_rel_iso", filter.max_rel_iso),
        ] {
            if let Some(v) = value {
                if !v.is_finite() {
                    return Err(AnalyzerError::InvalidParameters(format!(
                        "Selector '{}': {} must be finite, got {}",
                        name, label, v
                    )));
                }
            }
        }
        if matches!(&filter.abs_pdgids, Some(ids) if ids.is_empty()) {
            return Err(AnalyzerError::InvalidParameters(format!(
                "Selector '{}': abs_pdgids is empty, nothing would be selected",
                name
            )));
        }

        Ok(Self {
            name,
            output: params.output,
            input_objects: params.input_objects,
            filter: params.filter,
            seen: 0,
            selected: 0,
        })
    }

    /// Applies every criterion of the filter that is set.
    fn passes(&self, particle: &Particle, index: usize) -> Result<bool, AnalyzerError> {
        let f = &self.filter;
        if let Some(min) = f.min_energy {
            if !(particle.e() > min) {
                return Ok(false);
            }
        }
        if let Some(min) = f.min_pt {
            if !(particle.pt() > min) {
                return Ok(false);
            }
        }
        if let Some(ids) = &f.abs_pdgids {
            if !ids.contains(&particle.pdgid.abs()) {
                return Ok(false);
            }
        }
        if let Some(status) = f.status {
            if particle.status != status {
                return Ok(false);
            }
        }
        if let Some(max) = f.max_rel_iso {
            if particle.iso.is_none() {
                return Err(AnalyzerError::MissingIsolation {
                    collection: self.input_objects.clone(),
                    index,
                });
            }
            match particle.rel_iso() {
                Some(rel_iso) if rel_iso < max => {}
                _ => return Ok(false),
            }
        }
        Ok(true)
    }
}

impl Analyzer for Selector {
    fn name(&self) -> &str {
        &self.name
    }

    fn begin_loop(&mut self, _component: &str) {
        self.seen = 0;
        self.selected = 0;
    }

    fn process(&mut self, event: &mut Event) -> Result<(), AnalyzerError> {
        let input = event.particles(&self.input_objects)?;
        let mut selected: Vec<ParticleRef> = Vec::new();
        for (index, particle) in input.iter().enumerate() {
            if self.passes(particle, index)? {
                selected.push(particle.clone());
            }
        }

        self.seen += input.len() as u64;
        self.selected += selected.len() as u64;
        tracing::trace!(iev = event.iev(), input = input.len(), selected = selected.len(), "Selection done");

        event.set(self.output.as_str(), selected);
        Ok(())
    }

    fn end_loop(&mut self) {
        tracing::info!(
            seen = self.seen,
            selected = self.selected,
            "{}: '{}' -> '{}'",
            self.name,
            self.input_objects,
            self.output
        );
    }
}

use crate::Analyzer;
use crate::error::AnalyzerError;
use configuration::{Beams, RecoilBuilderParams, RunContext};
use core_types::{FourMomentum, Particle, ParticleRef};
use events::Event;
use std::sync::Arc;

/// Computes the system recoiling against the best resonance of a collection.
///
/// At an e+e- collider the initial state is known: `(√s, 0, 0, 0)`. The recoil is
/// published as a one-element collection, or an empty one if there is no resonance.
pub struct RecoilBuilder {
    name: String,
    output: String,
    object: String,
    initial_state: FourMomentum,
}

impl RecoilBuilder {
    pub fn new(name: String, params: RecoilBuilderParams, context: &RunContext) -> Result<Self, AnalyzerError> {
        if context.collider.beams != Beams::Ee {
            return Err(AnalyzerError::InvalidParameters(format!(
                "RecoilBuilder '{}' needs a known initial state and only supports ee beams",
                name
            )));
        }
        Ok(Self {
            name,
            output: params.output,
            object: params.object,
            initial_state: FourMomentum::new(context.collider.sqrts, 0.0, 0.0, 0.0),
        })
    }
}

impl Analyzer for RecoilBuilder {
    fn name(&self) -> &str {
        &self.name
    }

    fn process(&mut self, event: &mut Event) -> Result<(), AnalyzerError> {
        let recoil: Vec<ParticleRef> = event
            .resonances(&self.object)?
            .first()
            .map(|best| Arc::new(Particle::new(0, -best.charge(), self.initial_state - best.p4())))
            .into_iter()
            .collect();

        if let Some(r) = recoil.first() {
            tracing::debug!(iev = event.iev(), mass = r.m(), "Recoil against '{}'", self.object);
        }
        event.set(self.output.as_str(), recoil);
        Ok(())
    }
}

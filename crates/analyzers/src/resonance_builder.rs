use crate::Analyzer;
use crate::error::AnalyzerError;
use configuration::ResonanceBuilderParams;
use core_types::{ParticleRef, PdgId, Resonance};
use events::Event;
use itertools::Itertools;

/// Builds resonance candidates from every pair of particles in a collection.
///
/// Publishes:
/// - `<output>`: all candidates, sorted by distance of their mass to the nominal mass
///   of the target pdgid. The first one is the best.
/// - `<output>_legs`: the two legs of the best candidate, or an empty collection when
///   there is no candidate.
pub struct ResonanceBuilder {
    name: String,
    output: String,
    legs_output: String,
    leg_collection: String,
    pdgid: PdgId,
    // State: counters reported at the end of each loop.
    events_seen: u64,
    events_with_candidates: u64,
}

impl ResonanceBuilder {
    /// Creates a new `ResonanceBuilder`.
    ///
    /// The pdgid is resolved here, so an unknown code fails before any event is read.
    pub fn new(name: String, params: ResonanceBuilderParams) -> Result<Self, AnalyzerError> {
        let pdgid = PdgId::try_from(params.pdgid)?;
        if params.output.is_empty() || params.leg_collection.is_empty() {
            return Err(AnalyzerError::InvalidParameters(
                "ResonanceBuilder requires non-empty `output` and `leg_collection`".to_string(),
            ));
        }

        Ok(Self {
            name,
            legs_output: format!("{}_legs", params.output),
            output: params.output,
            leg_collection: params.leg_collection,
            pdgid,
            events_seen: 0,
            events_with_candidates: 0,
        })
    }

    pub fn pdgid(&self) -> PdgId {
        self.pdgid
    }
}

/// Forms every unordered pair of `legs` and sorts the candidates by `|m - nominal|`.
///
/// Pairs are enumerated with the first index varying slowest. The sort is stable, so
/// candidates at equal distance keep that order.
pub fn build_resonances(legs: &[ParticleRef], pdgid: PdgId) -> Vec<Resonance> {
    let mut resonances: Vec<Resonance> = legs
        .iter()
        .tuple_combinations()
        .map(|(leg1, leg2)| Resonance::new(leg1.clone(), leg2.clone(), pdgid))
        .collect();

    let nominal_mass = pdgid.nominal_mass();
    resonances.sort_by(|a, b| {
        (a.m() - nominal_mass)
            .abs()
            .total_cmp(&(b.m() - nominal_mass).abs())
    });
    resonances
}

impl Analyzer for ResonanceBuilder {
    fn name(&self) -> &str {
        &self.name
    }

    fn begin_loop(&mut self, _component: &str) {
        self.events_seen = 0;
        self.events_with_candidates = 0;
    }

    fn process(&mut self, event: &mut Event) -> Result<(), AnalyzerError> {
        let resonances = build_resonances(event.particles(&self.leg_collection)?, self.pdgid);
        let best_legs: Vec<ParticleRef> = resonances
            .first()
            .map(|best| best.legs().to_vec())
            .unwrap_or_default();

        self.events_seen += 1;
        if let Some(best) = resonances.first() {
            self.events_with_candidates += 1;
            tracing::debug!(
                iev = event.iev(),
                candidates = resonances.len(),
                best_mass = best.m(),
                "Built {} candidates",
                self.pdgid
            );
        }

        event.set(self.output.as_str(), resonances);
        event.set(self.legs_output.as_str(), best_legs);
        Ok(())
    }

    fn end_loop(&mut self) {
        tracing::info!(
            events = self.events_seen,
            with_candidates = self.events_with_candidates,
            "{}: {} candidates stored in '{}'",
            self.name,
            self.pdgid,
            self.output
        );
    }
}

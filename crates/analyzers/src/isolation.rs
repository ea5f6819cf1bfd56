use crate::Analyzer;
use crate::error::AnalyzerError;
use configuration::{IsoArea, IsolationParams};
use core_types::{Isolation, Particle, ParticleRef};
use events::Event;
use std::sync::Arc;

/// Computes the isolation of each lepton with respect to a collection of particles.
///
/// `event.<leptons>` is replaced by copies of the leptons carrying their `Isolation`,
/// in the same order.
pub struct IsolationAnalyzer {
    name: String,
    leptons: String,
    particles: String,
    radius: f64,
}

impl IsolationAnalyzer {
    pub fn new(name: String, params: IsolationParams) -> Result<Self, AnalyzerError> {
        let IsoArea::EtaPhiCircle { radius } = params.iso_area;
        if !(radius.is_finite() && radius > 0.0) {
            return Err(AnalyzerError::InvalidParameters(format!(
                "IsolationAnalyzer '{}': cone radius must be positive, got {}",
                name, radius
            )));
        }

        Ok(Self {
            name,
            leptons: params.leptons,
            particles: params.particles,
            radius,
        })
    }
}

/// Sums the particles inside a cone of `radius` around `lepton`, excluding the lepton
/// itself.
pub fn compute_isolation(lepton: &ParticleRef, particles: &[ParticleRef], radius: f64) -> Isolation {
    let mut iso = Isolation::default();
    for particle in particles {
        if Arc::ptr_eq(particle, lepton) || lepton.delta_r(particle) >= radius {
            continue;
        }
        iso.all.add(particle);
        match particle.pdgid.abs() {
            211 => iso.charged_hadrons.add(particle),
            22 => iso.photons.add(particle),
            130 => iso.neutral_hadrons.add(particle),
            _ => {}
        }
    }
    iso
}

impl Analyzer for IsolationAnalyzer {
    fn name(&self) -> &str {
        &self.name
    }

    fn process(&mut self, event: &mut Event) -> Result<(), AnalyzerError> {
        let particles = event.particles(&self.particles)?;
        let leptons = event.particles(&self.leptons)?;

        let isolated: Vec<ParticleRef> = leptons
            .iter()
            .map(|lepton| {
                let iso = compute_isolation(lepton, particles, self.radius);
                tracing::info!(
                    iev = event.iev(),
                    pdgid = lepton.pdgid,
                    pt = lepton.pt(),
                    sumpt = iso.all.sumpt,
                    num = iso.all.num,
                    "Lepton isolation"
                );
                Arc::new(Particle::clone(lepton).with_isolation(iso))
            })
            .collect();

        event.set(self.leptons.as_str(), isolated);
        Ok(())
    }
}

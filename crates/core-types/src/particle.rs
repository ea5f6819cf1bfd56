use crate::momentum::FourMomentum;
use std::sync::Arc;

/// Shared handle to a particle.
///
/// Derived collections (selections, resonance legs) hold clones of the handle, so
/// "the same particle" can be tested with `Arc::ptr_eq`.
pub type ParticleRef = Arc<Particle>;

/// Energy and transverse momentum summed over the particles found in an isolation area.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct IsoSum {
    pub sumpt: f64,
    pub sume: f64,
    pub num: usize,
}

impl IsoSum {
    pub fn add(&mut self, particle: &Particle) {
        self.sumpt += particle.pt();
        self.sume += particle.e();
        self.num += 1;
    }
}

/// Isolation of a particle, split by the family of the surrounding particles.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Isolation {
    pub all: IsoSum,
    /// |pdgid| = 211
    pub charged_hadrons: IsoSum,
    /// pdgid = 22
    pub photons: IsoSum,
    /// |pdgid| = 130
    pub neutral_hadrons: IsoSum,
}

/// A reconstructed or generated particle.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pdgid: i32,
    pub charge: i32,
    /// Generator status code; 1 for stable final-state particles.
    pub status: i32,
    pub p4: FourMomentum,
    /// Filled by the isolation analyzer.
    pub iso: Option<Isolation>,
}

impl Particle {
    /// Creates a stable particle without isolation information.
    pub fn new(pdgid: i32, charge: i32, p4: FourMomentum) -> Self {
        Self {
            pdgid,
            charge,
            status: 1,
            p4,
            iso: None,
        }
    }

    pub fn with_status(mut self, status: i32) -> Self {
        self.status = status;
        self
    }

    pub fn with_isolation(mut self, iso: Isolation) -> Self {
        self.iso = Some(iso);
        self
    }

    pub fn e(&self) -> f64 {
        self.p4.e
    }

    pub fn m(&self) -> f64 {
        self.p4.mass()
    }

    pub fn pt(&self) -> f64 {
        self.p4.pt()
    }

    pub fn eta(&self) -> f64 {
        self.p4.eta()
    }

    pub fn phi(&self) -> f64 {
        self.p4.phi()
    }

    pub fn delta_r(&self, other: &Particle) -> f64 {
        self.p4.delta_r(&other.p4)
    }

    /// Summed transverse momentum in the isolation area divided by the particle's own pt.
    ///
    /// `None` if isolation was never computed or the particle has no transverse momentum.
    pub fn rel_iso(&self) -> Option<f64> {
        let iso = self.iso.as_ref()?;
        let pt = self.pt();
        if pt > 0.0 { Some(iso.all.sumpt / pt) } else { None }
    }
}

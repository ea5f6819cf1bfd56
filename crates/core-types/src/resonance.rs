use crate::enums::PdgId;
use crate::momentum::FourMomentum;
use crate::particle::ParticleRef;
use std::sync::Arc;

/// A composite candidate built from exactly two particles.
///
/// The legs are shared handles into the collection the candidate was built from.
#[derive(Debug, Clone, PartialEq)]
pub struct Resonance {
    legs: [ParticleRef; 2],
    pdgid: PdgId,
    p4: FourMomentum,
    charge: i32,
}

impl Resonance {
    pub fn new(leg1: ParticleRef, leg2: ParticleRef, pdgid: PdgId) -> Self {
        let p4 = leg1.p4 + leg2.p4;
        let charge = leg1.charge + leg2.charge;
        Self {
            legs: [leg1, leg2],
            pdgid,
            p4,
            charge,
        }
    }

    /// The two legs, in the order they were paired.
    pub fn legs(&self) -> &[ParticleRef; 2] {
        &self.legs
    }

    pub fn leg1(&self) -> &ParticleRef {
        &self.legs[0]
    }

    pub fn leg2(&self) -> &ParticleRef {
        &self.legs[1]
    }

    pub fn pdgid(&self) -> PdgId {
        self.pdgid
    }

    pub fn p4(&self) -> FourMomentum {
        self.p4
    }

    pub fn charge(&self) -> i32 {
        self.charge
    }

    /// Invariant mass of the pair.
    pub fn m(&self) -> f64 {
        self.p4.mass()
    }

    /// Distance of the invariant mass to the nominal mass of the target type.
    pub fn mass_distance(&self) -> f64 {
        (self.m() - self.pdgid.nominal_mass()).abs()
    }

    /// Whether `particle` is one of the two legs (by identity, not value).
    pub fn has_leg(&self, particle: &ParticleRef) -> bool {
        self.legs.iter().any(|leg| Arc::ptr_eq(leg, particle))
    }
}

use core_types::{FourMomentum, Particle, ParticleRef};
use events::{Event, StoreRecord};
use std::sync::Arc;

pub fn particle(pdgid: i32, charge: i32, e: f64, px: f64, py: f64, pz: f64) -> ParticleRef {
    Arc::new(Particle::new(pdgid, charge, FourMomentum::new(e, px, py, pz)))
}

/// Massless particle of energy `e` moving in the transverse plane at angle `phi`.
pub fn transverse(pdgid: i32, e: f64, phi: f64) -> ParticleRef {
    particle(pdgid, 0, e, e * phi.cos(), e * phi.sin(), 0.0)
}

/// Three massless particles along x, y and z whose pairwise invariant masses are
/// `m12`, `m13` and `m23`.
///
/// For orthogonal massless momenta m_ij² = 2·E_i·E_j, which fixes the energies.
pub fn triplet_with_pair_masses(m12: f64, m13: f64, m23: f64) -> [ParticleRef; 3] {
    let a = m12 * m12 / 2.0;
    let b = m13 * m13 / 2.0;
    let c = m23 * m23 / 2.0;
    let e1 = (a * b / c).sqrt();
    let e2 = a / e1;
    let e3 = b / e1;
    [
        particle(13, -1, e1, e1, 0.0, 0.0),
        particle(-13, 1, e2, 0.0, e2, 0.0),
        particle(13, -1, e3, 0.0, 0.0, e3),
    ]
}

pub fn event_with(name: &str, particles: Vec<ParticleRef>) -> Event {
    let mut event = Event::new(0, StoreRecord::default());
    event.set(name, particles);
    event
}

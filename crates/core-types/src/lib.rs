pub mod enums;
pub mod error;
pub mod momentum;
pub mod particle;
pub mod resonance;

// Re-export the core types to provide a clean public API.
pub use enums::PdgId;
pub use error::CoreError;
pub use momentum::{FourMomentum, delta_phi};
pub use particle::{IsoSum, Isolation, Particle, ParticleRef};
pub use resonance::Resonance;

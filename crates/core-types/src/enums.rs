use crate::error::CoreError;
use std::fmt;

/// The resonance types a candidate can be built for.
///
/// The set is closed: each variant carries an entry in the reference mass table,
/// so a `PdgId` in hand always has a nominal mass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PdgId {
    Z,
    W,
    Higgs,
}

impl PdgId {
    /// The Particle Data Group code of this resonance.
    pub fn code(&self) -> i32 {
        match self {
            PdgId::Z => 23,
            PdgId::W => 24,
            PdgId::Higgs => 25,
        }
    }

    /// Nominal rest mass in GeV.
    pub fn nominal_mass(&self) -> f64 {
        match self {
            PdgId::Z => 91.0,
            PdgId::W => 80.4,
            PdgId::Higgs => 125.0,
        }
    }
}

impl TryFrom<i32> for PdgId {
    type Error = CoreError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            23 => Ok(PdgId::Z),
            24 => Ok(PdgId::W),
            25 => Ok(PdgId::Higgs),
            other => Err(CoreError::UnknownResonance(other)),
        }
    }
}

impl From<PdgId> for i32 {
    fn from(id: PdgId) -> Self {
        id.code()
    }
}

impl fmt::Display for PdgId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PdgId::Z => "Z",
            PdgId::W => "W",
            PdgId::Higgs => "H",
        };
        write!(f, "{} ({})", name, self.code())
    }
}

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Unknown resonance pdgid {0}: expected one of 23 (Z), 24 (W), 25 (Higgs)")]
    UnknownResonance(i32),
}

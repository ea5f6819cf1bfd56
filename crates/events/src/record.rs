use core_types::{FourMomentum, Particle};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One particle as stored in an event file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticleRecord {
    pub pdgid: i32,
    #[serde(default)]
    pub charge: i32,
    #[serde(default = "default_status")]
    pub status: i32,
    pub e: f64,
    pub px: f64,
    pub py: f64,
    pub pz: f64,
}

fn default_status() -> i32 {
    1
}

impl From<&ParticleRecord> for Particle {
    fn from(record: &ParticleRecord) -> Self {
        Particle::new(
            record.pdgid,
            record.charge,
            FourMomentum::new(record.e, record.px, record.py, record.pz),
        )
        .with_status(record.status)
    }
}

/// A raw event as read from the store: named collections of particle records.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StoreRecord {
    #[serde(default)]
    pub collections: HashMap<String, Vec<ParticleRecord>>,
}

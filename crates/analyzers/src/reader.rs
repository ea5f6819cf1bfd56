use crate::Analyzer;
use crate::error::AnalyzerError;
use configuration::ReaderParams;
use core_types::{Particle, ParticleRef};
use events::Event;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Turns the raw collections of the store record into particle collections on the event.
pub struct Reader {
    name: String,
    /// Event attribute name -> store collection name.
    collections: BTreeMap<String, String>,
}

impl Reader {
    pub fn new(name: String, params: ReaderParams) -> Result<Self, AnalyzerError> {
        if params.collections.is_empty() {
            return Err(AnalyzerError::InvalidParameters(format!(
                "Reader '{}' declares no collections",
                name
            )));
        }
        Ok(Self {
            name,
            collections: params.collections,
        })
    }
}

impl Analyzer for Reader {
    fn name(&self) -> &str {
        &self.name
    }

    fn process(&mut self, event: &mut Event) -> Result<(), AnalyzerError> {
        let mut converted = Vec::with_capacity(self.collections.len());
        for (attribute, store_name) in &self.collections {
            let records = event
                .record()
                .collections
                .get(store_name)
                .ok_or_else(|| AnalyzerError::MissingStoreCollection(store_name.clone()))?;
            let particles: Vec<ParticleRef> = records.iter().map(|r| Arc::new(Particle::from(r))).collect();
            converted.push((attribute.as_str(), particles));
        }

        for (attribute, particles) in converted {
            event.set(attribute, particles);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use events::{ParticleRecord, StoreRecord};

    fn record() -> StoreRecord {
        let muon = ParticleRecord {
            pdgid: 13,
            charge: -1,
            status: 1,
            e: 45.0,
            px: 0.0,
            py: 0.0,
            pz: 45.0,
        };
        let mut record = StoreRecord::default();
        record.collections.insert("GenParticle".to_string(), vec![muon.clone(), muon]);
        record
    }

    fn reader(store_name: &str) -> Reader {
        let mut collections = BTreeMap::new();
        collections.insert("gen_particles".to_string(), store_name.to_string());
        Reader::new("source".to_string(), ReaderParams { collections }).unwrap()
    }

    #[test]
    fn converts_store_collections() {
        let mut event = Event::new(0, record());
        reader("GenParticle").process(&mut event).unwrap();

        let particles = event.particles("gen_particles").unwrap();
        assert_eq!(particles.len(), 2);
        assert_eq!(particles[0].pdgid, 13);
        assert!(!Arc::ptr_eq(&particles[0], &particles[1]));
    }

    #[test]
    fn missing_store_collection_is_an_error() {
        let mut event = Event::new(0, record());
        let err = reader("GenVertex").process(&mut event).unwrap_err();
        assert!(matches!(err, AnalyzerError::MissingStoreCollection(name) if name == "GenVertex"));
        assert!(!event.contains("gen_particles"));
    }

    #[test]
    fn requires_at_least_one_collection() {
        let err = Reader::new("source".to_string(), ReaderParams { collections: BTreeMap::new() })
            .err()
            .unwrap();
        assert!(matches!(err, AnalyzerError::InvalidParameters(_)));
    }
}

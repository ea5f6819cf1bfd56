use crate::error::EventError;
use crate::record::StoreRecord;
use core_types::{ParticleRef, Resonance};
use std::collections::BTreeMap;

/// A value stored under a named event attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum EventValue {
    Particles(Vec<ParticleRef>),
    Resonances(Vec<Resonance>),
}

impl EventValue {
    /// Human-readable kind, used in type mismatch errors.
    pub fn kind(&self) -> &'static str {
        match self {
            EventValue::Particles(_) => "particles",
            EventValue::Resonances(_) => "resonances",
        }
    }

    pub fn len(&self) -> usize {
        match self {
            EventValue::Particles(p) => p.len(),
            EventValue::Resonances(r) => r.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Vec<ParticleRef>> for EventValue {
    fn from(particles: Vec<ParticleRef>) -> Self {
        EventValue::Particles(particles)
    }
}

impl From<Vec<Resonance>> for EventValue {
    fn from(resonances: Vec<Resonance>) -> Self {
        EventValue::Resonances(resonances)
    }
}

/// The mutable state of one event while it travels through the sequence.
#[derive(Debug, Clone, Default)]
pub struct Event {
    iev: u64,
    record: StoreRecord,
    attributes: BTreeMap<String, EventValue>,
}

impl Event {
    pub fn new(iev: u64, record: StoreRecord) -> Self {
        Self {
            iev,
            record,
            attributes: BTreeMap::new(),
        }
    }

    /// Index of the event within its component.
    pub fn iev(&self) -> u64 {
        self.iev
    }

    /// The raw store record this event was built from.
    pub fn record(&self) -> &StoreRecord {
        &self.record
    }

    /// Publishes `value` under `name`, replacing any previous value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<EventValue>) {
        self.attributes.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Result<&EventValue, EventError> {
        self.attributes
            .get(name)
            .ok_or_else(|| EventError::MissingAttribute(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Attribute names, in lexical order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.attributes.keys().map(String::as_str)
    }

    /// Reads a particle collection.
    pub fn particles(&self, name: &str) -> Result<&[ParticleRef], EventError> {
        match self.get(name)? {
            EventValue::Particles(p) => Ok(p),
            other => Err(EventError::TypeMismatch {
                name: name.to_string(),
                expected: "particles",
                found: other.kind(),
            }),
        }
    }

    /// Reads a resonance collection.
    pub fn resonances(&self, name: &str) -> Result<&[Resonance], EventError> {
        match self.get(name)? {
            EventValue::Resonances(r) => Ok(r),
            other => Err(EventError::TypeMismatch {
                name: name.to_string(),
                expected: "resonances",
                found: other.kind(),
            }),
        }
    }
}

//! # Event
//!
//! The per-event attribute store shared by every analyzer in a sequence.
//!
//! An `Event` is built by the looper from one raw `StoreRecord`, then each analyzer
//! reads the collections it needs and publishes its results under the names given in
//! its configuration. Keys are therefore namespaced by the producing analyzer's
//! `output` settings; nothing else coordinates them.

// Declare the modules that make up this crate.
pub mod error;
pub mod event;
pub mod record;

// Re-export the core types to provide a clean public API.
pub use error::EventError;
pub use event::{Event, EventValue};
pub use record::{ParticleRecord, StoreRecord};

//! In-memory collaborators for testing.
//!
//! Available behind the `test-utils` feature flag. The registry and the
//! reference engine agree on one small function set, so a namespace built
//! from them is callable end to end.

mod in_memory_registry;
mod recording_engine;
mod reference_engine;
mod static_addenda;

pub use in_memory_registry::{InMemoryRegistry, standard_descriptors};
pub use recording_engine::{DispatchRecord, RecordingEngine};
pub use reference_engine::ReferenceEngine;
pub use static_addenda::StaticAddenda;

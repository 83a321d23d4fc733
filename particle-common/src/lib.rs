pub mod config;
pub mod error;
pub mod layout;
pub mod snapshot;
pub mod vecmath;

// Re-export key types for easier use by dependent crates
pub use config::{InputConfig, OutputConfig, OutputFormat, SnapshotToolConfig};
pub use error::{Error, Result};
pub use layout::{ParticleRecord, RawHeader, HEADER_SIZE, RECORD_SIZE};
pub use snapshot::{Particle, ParticleSnapshot};
pub use vecmath::Vec3;

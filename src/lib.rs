//! Reader and tooling for binary dust-particle snapshots written by a
//! hydrodynamic disk simulation.
//!
//! The core is [`decoder::read_particles`], which turns one snapshot file into
//! an id-sorted [`ParticleSnapshot`]. The other modules write the same layout,
//! find snapshot files in a data directory, decode many of them in parallel,
//! export them to common formats and summarize their contents.

pub mod batch;
pub mod decoder;
pub mod discovery;
pub mod encoder;
pub mod export;
pub mod grid;
pub mod summary;

pub use batch::{decode_all, decode_directory, BatchEntry};
pub use decoder::{decode, decode_bytes, read_particles};
pub use discovery::{list_data_files, step_label};
pub use encoder::{encode, write_particles};
pub use export::export_snapshot;
pub use grid::{timestep_group, GridCoordinates, GridField, GridSource};
pub use summary::{cell_occupancy, SnapshotSummary};

pub use particle_common::{Error, OutputFormat, Particle, ParticleSnapshot, Result, SnapshotToolConfig, Vec3};

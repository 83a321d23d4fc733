//! Grid field interface.
//!
//! Hydrodynamic fields live in hierarchical data files, one group per output
//! step (see [`timestep_group`]). Reading that format is left to an external
//! backend implementing [`GridSource`]; this module defines the values it
//! hands back and how particle host cells index into them.

use particle_common::{Error, ParticleSnapshot, Result};

/// A dense field (density, pressure, ...) over a structured mesh at one step.
/// `data` is row-major with the last axis varying fastest.
#[derive(Debug, Clone, PartialEq)]
pub struct GridField {
    shape: Vec<usize>,
    data: Vec<f64>,
}

/// Cell-center coordinates along each mesh axis.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GridCoordinates {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
}

/// A source of grid fields, typically one HDF5 output file. An absent field
/// is reported as [`Error::MissingField`] with the full group path.
pub trait GridSource {
    fn read_field(&self, step: u32, name: &str) -> Result<GridField>;
    fn read_coordinates(&self) -> Result<GridCoordinates>;
}

/// Group path holding the field variables written at `step`.
pub fn timestep_group(step: u32) -> String {
    format!("Timestep_{}/vars", step)
}

impl GridField {
    pub fn new(shape: Vec<usize>, data: Vec<f64>) -> Result<Self> {
        let expected: usize = shape.iter().product();
        if expected != data.len() {
            return Err(Error::malformed(format!(
                "field shape {:?} needs {} values, got {}",
                shape,
                expected,
                data.len()
            )));
        }
        Ok(GridField { shape, data })
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Flat index of a cell, or `None` if any index is negative or out of range.
    pub fn flat_index(&self, cell: &[i32]) -> Option<usize> {
        if cell.len() != self.shape.len() {
            return None;
        }
        let mut flat = 0usize;
        for (&idx, &dim) in cell.iter().zip(&self.shape) {
            let idx = usize::try_from(idx).ok()?;
            if idx >= dim {
                return None;
            }
            flat = flat * dim + idx;
        }
        Some(flat)
    }

    pub fn at(&self, cell: &[i32]) -> Option<f64> {
        self.flat_index(cell).map(|i| self.data[i])
    }

    /// Field value in each particle's host cell, in the snapshot's id order.
    /// Particles whose cell lies outside the field get `None`.
    pub fn sample_at_particles(&self, snapshot: &ParticleSnapshot) -> Vec<Option<f64>> {
        snapshot.particles().map(|p| self.at(&p.cell)).collect()
    }
}

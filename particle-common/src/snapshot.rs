use crate::vecmath::Vec3;
use serde::{Deserialize, Serialize};

/// One particle's state, as a row of a [`ParticleSnapshot`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub id: i32,
    /// Host grid cell index (x, y, z).
    pub cell: [i32; 3],
    pub position: Vec3,
    pub velocity: Vec3,
    /// Aerodynamic stopping time.
    pub stopping_time: f64,
}

/// The state of all simulated particles at one simulation step.
///
/// Stored as a structure of arrays. Every column has the same length and rows
/// are ordered by ascending particle id. Fields are private so a snapshot
/// cannot be mutated after it has been built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticleSnapshot {
    step: i32,
    time: f64,
    pid: Vec<i32>,
    pcell_x: Vec<i32>,
    pcell_y: Vec<i32>,
    pcell_z: Vec<i32>,
    pos_x: Vec<f64>,
    pos_y: Vec<f64>,
    pos_z: Vec<f64>,
    vel_x: Vec<f64>,
    vel_y: Vec<f64>,
    vel_z: Vec<f64>,
    tstop: Vec<f64>,
}

impl ParticleSnapshot {
    /// Builds a snapshot from rows in any order. Rows are stably sorted by id,
    /// so particles sharing an id keep their relative input order.
    pub fn from_particles(step: i32, time: f64, mut particles: Vec<Particle>) -> Self {
        particles.sort_by_key(|p| p.id);

        let n = particles.len();
        let mut snapshot = ParticleSnapshot {
            step,
            time,
            pid: Vec::with_capacity(n),
            pcell_x: Vec::with_capacity(n),
            pcell_y: Vec::with_capacity(n),
            pcell_z: Vec::with_capacity(n),
            pos_x: Vec::with_capacity(n),
            pos_y: Vec::with_capacity(n),
            pos_z: Vec::with_capacity(n),
            vel_x: Vec::with_capacity(n),
            vel_y: Vec::with_capacity(n),
            vel_z: Vec::with_capacity(n),
            tstop: Vec::with_capacity(n),
        };
        for p in &particles {
            snapshot.pid.push(p.id);
            snapshot.pcell_x.push(p.cell[0]);
            snapshot.pcell_y.push(p.cell[1]);
            snapshot.pcell_z.push(p.cell[2]);
            snapshot.pos_x.push(p.position.x);
            snapshot.pos_y.push(p.position.y);
            snapshot.pos_z.push(p.position.z);
            snapshot.vel_x.push(p.velocity.x);
            snapshot.vel_y.push(p.velocity.y);
            snapshot.vel_z.push(p.velocity.z);
            snapshot.tstop.push(p.stopping_time);
        }
        snapshot
    }

    /// A snapshot with no particles.
    pub fn empty(step: i32, time: f64) -> Self {
        Self::from_particles(step, time, Vec::new())
    }

    pub fn step(&self) -> i32 {
        self.step
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    /// Number of particles `N`.
    pub fn len(&self) -> usize {
        self.pid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pid.is_empty()
    }

    pub fn ids(&self) -> &[i32] {
        &self.pid
    }

    pub fn cell_x(&self) -> &[i32] {
        &self.pcell_x
    }

    pub fn cell_y(&self) -> &[i32] {
        &self.pcell_y
    }

    pub fn cell_z(&self) -> &[i32] {
        &self.pcell_z
    }

    pub fn pos_x(&self) -> &[f64] {
        &self.pos_x
    }

    pub fn pos_y(&self) -> &[f64] {
        &self.pos_y
    }

    pub fn pos_z(&self) -> &[f64] {
        &self.pos_z
    }

    pub fn vel_x(&self) -> &[f64] {
        &self.vel_x
    }

    pub fn vel_y(&self) -> &[f64] {
        &self.vel_y
    }

    pub fn vel_z(&self) -> &[f64] {
        &self.vel_z
    }

    pub fn stopping_times(&self) -> &[f64] {
        &self.tstop
    }

    /// Row view of particle `idx` (position in id order, not the id itself).
    pub fn particle(&self, idx: usize) -> Option<Particle> {
        if idx >= self.len() {
            return None;
        }
        Some(Particle {
            id: self.pid[idx],
            cell: [self.pcell_x[idx], self.pcell_y[idx], self.pcell_z[idx]],
            position: Vec3::new(self.pos_x[idx], self.pos_y[idx], self.pos_z[idx]),
            velocity: Vec3::new(self.vel_x[idx], self.vel_y[idx], self.vel_z[idx]),
            stopping_time: self.tstop[idx],
        })
    }

    /// Iterates rows in ascending id order.
    pub fn particles(&self) -> impl Iterator<Item = Particle> + '_ {
        (0..self.len()).filter_map(move |i| self.particle(i))
    }

    /// Looks up a particle by id.
    pub fn find(&self, id: i32) -> Option<Particle> {
        self.pid.binary_search(&id).ok().and_then(|idx| self.particle(idx))
    }

    /// First NaN or infinite value, as (particle id, field name). The id is
    /// `None` when the snapshot time itself is not finite.
    pub fn first_non_finite(&self) -> Option<(Option<i32>, &'static str)> {
        if !self.time.is_finite() {
            return Some((None, "time"));
        }
        let columns: [(&'static str, &[f64]); 7] = [
            ("pos_x", self.pos_x.as_slice()),
            ("pos_y", self.pos_y.as_slice()),
            ("pos_z", self.pos_z.as_slice()),
            ("vel_x", self.vel_x.as_slice()),
            ("vel_y", self.vel_y.as_slice()),
            ("vel_z", self.vel_z.as_slice()),
            ("tstop", self.tstop.as_slice()),
        ];
        for idx in 0..self.len() {
            for (name, column) in &columns {
                if !column[idx].is_finite() {
                    return Some((Some(self.pid[idx]), *name));
                }
            }
        }
        None
    }

    /// Number of rows whose id equals the previous row's id.
    pub fn duplicate_id_count(&self) -> usize {
        self.pid.windows(2).filter(|w| w[0] == w[1]).count()
    }
}

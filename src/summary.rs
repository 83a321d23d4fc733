use particle_common::{ParticleSnapshot, Vec3};
use serde::Serialize;
use std::collections::BTreeMap;

/// Inspection statistics for one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotSummary {
    pub step: i32,
    pub time: f64,
    pub particle_count: usize,
    pub id_range: Option<(i32, i32)>,
    /// Axis-aligned box enclosing all positions (min, max).
    pub bounds: Option<(Vec3, Vec3)>,
    /// Mean velocity magnitude; 0 for an empty snapshot.
    pub mean_speed: f64,
    pub stopping_time_range: Option<(f64, f64)>,
    pub occupied_cells: usize,
    pub max_particles_per_cell: u32,
}

/// Number of particles hosted by each grid cell.
pub fn cell_occupancy(snapshot: &ParticleSnapshot) -> BTreeMap<[i32; 3], u32> {
    let mut counts = BTreeMap::new();
    for p in snapshot.particles() {
        *counts.entry(p.cell).or_insert(0) += 1;
    }
    counts
}

impl SnapshotSummary {
    pub fn from_snapshot(snapshot: &ParticleSnapshot) -> Self {
        let ids = snapshot.ids();
        // Ids are sorted, so the range is the first and last entry.
        let id_range = ids.first().zip(ids.last()).map(|(&lo, &hi)| (lo, hi));

        let mut bounds: Option<(Vec3, Vec3)> = None;
        let mut speed_sum = 0.0;
        let mut tstop_range: Option<(f64, f64)> = None;
        for p in snapshot.particles() {
            bounds = Some(match bounds {
                Some((lo, hi)) => (lo.min(p.position), hi.max(p.position)),
                None => (p.position, p.position),
            });
            speed_sum += p.velocity.length();
            tstop_range = Some(match tstop_range {
                Some((lo, hi)) => (lo.min(p.stopping_time), hi.max(p.stopping_time)),
                None => (p.stopping_time, p.stopping_time),
            });
        }
        let mean_speed = if snapshot.is_empty() { 0.0 } else { speed_sum / snapshot.len() as f64 };

        let occupancy = cell_occupancy(snapshot);
        SnapshotSummary {
            step: snapshot.step(),
            time: snapshot.time(),
            particle_count: snapshot.len(),
            id_range,
            bounds,
            mean_speed,
            stopping_time_range: tstop_range,
            occupied_cells: occupancy.len(),
            max_particles_per_cell: occupancy.values().copied().max().unwrap_or(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use particle_common::Particle;

    #[test]
    fn empty_snapshot_has_no_ranges() {
        let summary = SnapshotSummary::from_snapshot(&ParticleSnapshot::empty(4, 1.0));
        assert_eq!(summary.particle_count, 0);
        assert_eq!(summary.id_range, None);
        assert_eq!(summary.bounds, None);
        assert_eq!(summary.stopping_time_range, None);
        assert_eq!(summary.mean_speed, 0.0);
        assert_eq!(summary.occupied_cells, 0);
        assert_eq!(summary.max_particles_per_cell, 0);
    }

    #[test]
    fn statistics_over_three_particles() {
        let particles = vec![
            Particle {
                id: 5,
                cell: [1, 0, 0],
                position: Vec3::new(1.0, -1.0, 0.0),
                velocity: Vec3::new(3.0, 4.0, 0.0),
                stopping_time: 0.5,
            },
            Particle {
                id: 2,
                cell: [1, 0, 0],
                position: Vec3::new(-2.0, 3.0, 1.0),
                velocity: Vec3::new(0.0, 0.0, 2.0),
                stopping_time: 0.1,
            },
            Particle {
                id: 9,
                cell: [0, 0, 0],
                position: Vec3::new(0.0, 0.0, -4.0),
                velocity: Vec3::zero(),
                stopping_time: 2.0,
            },
        ];
        let snapshot = ParticleSnapshot::from_particles(8, 0.75, particles);
        let summary = SnapshotSummary::from_snapshot(&snapshot);

        assert_eq!(summary.step, 8);
        assert_eq!(summary.particle_count, 3);
        assert_eq!(summary.id_range, Some((2, 9)));
        assert_eq!(summary.bounds, Some((Vec3::new(-2.0, -1.0, -4.0), Vec3::new(1.0, 3.0, 1.0))));
        assert!((summary.mean_speed - 7.0 / 3.0).abs() < 1e-12);
        assert_eq!(summary.stopping_time_range, Some((0.1, 2.0)));
        assert_eq!(summary.occupied_cells, 2);
        assert_eq!(summary.max_particles_per_cell, 2);

        let occupancy = cell_occupancy(&snapshot);
        assert_eq!(occupancy.get(&[1, 0, 0]), Some(&2));
        assert_eq!(occupancy.get(&[0, 0, 0]), Some(&1));
    }
}

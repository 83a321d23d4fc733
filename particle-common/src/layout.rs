//! On-disk layout of a particle snapshot file.
//!
//! A file is a 16-byte header followed by `count` fixed-size records, all
//! little-endian and unpadded:
//!
//! | region      | field                     | type      |
//! |-------------|---------------------------|-----------|
//! | header      | particle count            | i32       |
//! | header      | step index                | i32       |
//! | header      | simulation time           | f64       |
//! | per record  | id                        | i32       |
//! | per record  | host cell x, y, z         | i32 x 3   |
//! | per record  | position x, y, z          | f64 x 3   |
//! | per record  | velocity x, y, z          | f64 x 3   |
//! | per record  | stopping time             | f64       |
//!
//! The structs below use zerocopy's byte-order-aware unaligned field types so
//! a slice of records can be viewed directly over the file bytes.

use crate::snapshot::Particle;
use crate::vecmath::Vec3;
use zerocopy::byteorder::little_endian::{F64, I32};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};

pub const HEADER_SIZE: usize = 16;
pub const RECORD_SIZE: usize = 72;

#[derive(Debug, Clone, Copy, PartialEq, FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned)]
#[repr(C)]
pub struct RawHeader {
    pub count: I32,
    pub step: I32,
    pub time: F64,
}

#[derive(Debug, Clone, Copy, PartialEq, FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned)]
#[repr(C)]
pub struct ParticleRecord {
    pub id: I32,
    pub cell_x: I32,
    pub cell_y: I32,
    pub cell_z: I32,
    pub pos_x: F64,
    pub pos_y: F64,
    pub pos_z: F64,
    pub vel_x: F64,
    pub vel_y: F64,
    pub vel_z: F64,
    pub tstop: F64,
}

const _: () = assert!(std::mem::size_of::<RawHeader>() == HEADER_SIZE);
const _: () = assert!(std::mem::size_of::<ParticleRecord>() == RECORD_SIZE);

impl RawHeader {
    pub fn new(count: i32, step: i32, time: f64) -> Self {
        RawHeader { count: I32::new(count), step: I32::new(step), time: F64::new(time) }
    }
}

impl From<&ParticleRecord> for Particle {
    fn from(rec: &ParticleRecord) -> Self {
        Particle {
            id: rec.id.get(),
            cell: [rec.cell_x.get(), rec.cell_y.get(), rec.cell_z.get()],
            position: Vec3::new(rec.pos_x.get(), rec.pos_y.get(), rec.pos_z.get()),
            velocity: Vec3::new(rec.vel_x.get(), rec.vel_y.get(), rec.vel_z.get()),
            stopping_time: rec.tstop.get(),
        }
    }
}

impl From<&Particle> for ParticleRecord {
    fn from(p: &Particle) -> Self {
        ParticleRecord {
            id: I32::new(p.id),
            cell_x: I32::new(p.cell[0]),
            cell_y: I32::new(p.cell[1]),
            cell_z: I32::new(p.cell[2]),
            pos_x: F64::new(p.position.x),
            pos_y: F64::new(p.position.y),
            pos_z: F64::new(p.position.z),
            vel_x: F64::new(p.velocity.x),
            vel_y: F64::new(p.velocity.y),
            vel_z: F64::new(p.velocity.z),
            tstop: F64::new(p.stopping_time),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_bytes_are_little_endian() {
        let header = RawHeader::new(2, 5, 1.25);
        let bytes = header.as_bytes();
        assert_eq!(&bytes[0..4], &2i32.to_le_bytes());
        assert_eq!(&bytes[4..8], &5i32.to_le_bytes());
        assert_eq!(&bytes[8..16], &1.25f64.to_le_bytes());
    }

    #[test]
    fn record_is_four_ints_and_seven_doubles() {
        assert_eq!(RECORD_SIZE, 4 * 4 + 7 * 8);
        assert_eq!(std::mem::size_of::<ParticleRecord>(), 72);
    }

    #[test]
    fn record_field_offsets_match_file_layout() {
        let p = Particle {
            id: 7,
            cell: [1, 2, 3],
            position: Vec3::new(0.5, 1.5, 2.5),
            velocity: Vec3::new(-1.0, -2.0, -3.0),
            stopping_time: 0.01,
        };
        let rec = ParticleRecord::from(&p);
        let bytes = rec.as_bytes();
        assert_eq!(bytes.len(), RECORD_SIZE);
        assert_eq!(&bytes[0..4], &7i32.to_le_bytes());
        assert_eq!(&bytes[12..16], &3i32.to_le_bytes());
        assert_eq!(&bytes[16..24], &0.5f64.to_le_bytes());
        assert_eq!(&bytes[40..48], &(-1.0f64).to_le_bytes());
        assert_eq!(&bytes[64..72], &0.01f64.to_le_bytes());
        assert_eq!(Particle::from(&rec), p);
    }
}

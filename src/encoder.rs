use log::debug;
use particle_common::{Error, ParticleRecord, ParticleSnapshot, RawHeader, Result, HEADER_SIZE, RECORD_SIZE};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use zerocopy::IntoBytes;

/// Encodes a snapshot in the binary particle layout, records in the
/// snapshot's (id) order.
pub fn encode(snapshot: &ParticleSnapshot) -> Result<Vec<u8>> {
    let count = i32::try_from(snapshot.len()).map_err(|_| {
        Error::malformed(format!("{} particles do not fit the 32-bit count field", snapshot.len()))
    })?;

    let mut bytes = Vec::with_capacity(HEADER_SIZE + snapshot.len() * RECORD_SIZE);
    bytes.extend_from_slice(RawHeader::new(count, snapshot.step(), snapshot.time()).as_bytes());
    for particle in snapshot.particles() {
        bytes.extend_from_slice(ParticleRecord::from(&particle).as_bytes());
    }
    Ok(bytes)
}

/// Writes `snapshot` to `path`, replacing any existing file.
pub fn write_particles<P: AsRef<Path>>(path: P, snapshot: &ParticleSnapshot) -> Result<()> {
    let path = path.as_ref();
    let bytes = encode(snapshot)?;
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(&bytes)?;
    writer.flush()?;
    debug!("Wrote {} particles ({} bytes) to {}", snapshot.len(), bytes.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::decode_bytes;
    use particle_common::{Particle, Vec3};

    #[test]
    fn encoded_length_matches_layout() {
        let particles = (0..3)
            .map(|id| Particle {
                id,
                cell: [0, 0, 0],
                position: Vec3::zero(),
                velocity: Vec3::zero(),
                stopping_time: 0.0,
            })
            .collect();
        let snapshot = ParticleSnapshot::from_particles(1, 2.0, particles);
        let bytes = encode(&snapshot).unwrap();
        assert_eq!(bytes.len(), HEADER_SIZE + 3 * RECORD_SIZE);
        assert_eq!(&bytes[0..4], &3i32.to_le_bytes());
    }

    #[test]
    fn decoder_reads_what_encoder_writes() {
        let snapshot = ParticleSnapshot::from_particles(
            40,
            7.5,
            vec![Particle {
                id: 11,
                cell: [4, -1, 2],
                position: Vec3::new(1.0e-3, 2.5, f64::MAX),
                velocity: Vec3::new(-0.0, 1.0e300, -7.25),
                stopping_time: 3.0e-9,
            }],
        );
        assert_eq!(decode_bytes(&encode(&snapshot).unwrap()).unwrap(), snapshot);
    }
}

use log::{debug, trace, warn};
use particle_common::{Error, Particle, ParticleRecord, ParticleSnapshot, RawHeader, Result, HEADER_SIZE, RECORD_SIZE};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use zerocopy::FromBytes;

/// Reads and decodes the particle snapshot stored at `path`.
///
/// The file handle lives only for the duration of this call and is closed on
/// every exit path. The file is never modified.
pub fn read_particles<P: AsRef<Path>>(path: P) -> Result<ParticleSnapshot> {
    let path = path.as_ref();
    debug!("Reading particle snapshot {}", path.display());
    let file = File::open(path)?;
    decode(file)
}

/// Decodes a snapshot from any byte source, reading it to the end.
pub fn decode<R: Read>(mut reader: R) -> Result<ParticleSnapshot> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    decode_bytes(&bytes)
}

/// Decodes a snapshot from an in-memory buffer.
///
/// Records are copied out of `bytes` and stably sorted by particle id, so the
/// returned snapshot does not borrow from the buffer.
pub fn decode_bytes(bytes: &[u8]) -> Result<ParticleSnapshot> {
    let (header, body) = RawHeader::read_from_prefix(bytes).map_err(|_| {
        Error::malformed(format!("file holds {} bytes, header needs {}", bytes.len(), HEADER_SIZE))
    })?;

    let declared = header.count.get();
    let step = header.step.get();
    let time = header.time.get();
    trace!("Header: count={} step={} time={}", declared, step, time);

    if declared < 0 {
        return Err(Error::malformed(format!("particle count {} is negative", declared)));
    }
    let count = declared as usize;

    // Compare against the buffer before allocating anything sized by the header.
    let available = body.len() / RECORD_SIZE;
    if available < count {
        return Err(Error::malformed(format!(
            "header declares {} particles but only {} complete records follow ({} bytes)",
            count,
            available,
            body.len()
        )));
    }

    let (records, trailing) = <[ParticleRecord]>::ref_from_prefix_with_elems(body, count)
        .map_err(|_| Error::malformed(format!("cannot view {} records over {} bytes", count, body.len())))?;
    if !trailing.is_empty() {
        warn!(
            "Ignoring {} trailing bytes after {} declared particle records.",
            trailing.len(),
            count
        );
    }

    let particles: Vec<Particle> = records.iter().map(Particle::from).collect();
    let snapshot = ParticleSnapshot::from_particles(step, time, particles);

    let duplicates = snapshot.duplicate_id_count();
    if duplicates > 0 {
        warn!("Snapshot at step {} contains {} duplicated particle ids.", step, duplicates);
    }
    debug!("Decoded {} particles at step {} (t = {}).", snapshot.len(), step, time);
    Ok(snapshot)
}

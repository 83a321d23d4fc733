use thiserror::Error;

/// Result type used by the snapshot codec.
pub type Result<T> = std::result::Result<T, Error>;

/// Failures of a single decode or encode call.
///
/// Both kinds are terminal for the call that hit them: a truncated or corrupt
/// file does not become valid by reading it again, and no partial snapshot is
/// ever returned.
#[derive(Debug, Error)]
pub enum Error {
    /// The file could not be opened, read or written.
    #[error("I/O failure: {0}")]
    IoFailure(#[from] std::io::Error),

    /// The bytes do not hold a complete snapshot (short header, negative
    /// particle count, or fewer records than the header declares).
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// A grid source has no field under the requested group path.
    #[error("missing field: {0}")]
    MissingField(String),
}

impl Error {
    pub fn malformed(msg: impl Into<String>) -> Self {
        Error::MalformedInput(msg.into())
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, Error::MalformedInput(_))
    }

    pub fn is_io(&self) -> bool {
        matches!(self, Error::IoFailure(_))
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Error::MissingField(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_message_names_the_problem() {
        let e = Error::malformed("particle count -3 is negative");
        let msg = format!("{e}");
        assert!(msg.contains("malformed input"));
        assert!(msg.contains("-3"));
        assert!(e.is_malformed());
        assert!(!e.is_io());
    }

    #[test]
    fn missing_field_is_its_own_kind() {
        let e = Error::MissingField("Timestep_3/vars/prs".to_string());
        assert_eq!(format!("{e}"), "missing field: Timestep_3/vars/prs");
        assert!(e.is_missing());
        assert!(!e.is_malformed());
    }

    #[test]
    fn io_errors_convert_with_question_mark() {
        fn open_missing() -> Result<()> {
            std::fs::File::open("/definitely/not/a/real/path.dat")?;
            Ok(())
        }
        let err = open_missing().unwrap_err();
        assert!(err.is_io());
    }
}

// src/error.rs
//! Error types for the GPS toolbox

use std::fmt;

pub type Result<T> = std::result::Result<T, GpsError>;

#[derive(Debug)]
pub enum GpsError {
    Io(std::io::Error),
    /// Computed checksum disagrees with the `*HH` suffix on the record.
    ChecksumMismatch { expected: String, found: String },
    /// The record reports no usable fix (RMC `V`, GGA quality 0,
    /// or a LOCUS fix code outside 1..=4).
    InvalidFix(String),
    /// NMEA sentence type this crate does not decode.
    UnsupportedFrame(String),
    /// Field count, numeric parse, or layout failure in a record.
    MalformedRecord(String),
    /// Two consecutive waypoints with no elapsed time between them.
    ZeroDuration,
    /// File extension with no import routine.
    UnsupportedFormat(String),
}

impl fmt::Display for GpsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpsError::Io(e) => write!(f, "IO error: {}", e),
            GpsError::ChecksumMismatch { expected, found } => {
                write!(f, "Checksum mismatch: computed {}, record carries {}", expected, found)
            }
            GpsError::InvalidFix(msg) => write!(f, "Invalid fix: {}", msg),
            GpsError::UnsupportedFrame(frame) => write!(f, "Unsupported frame: {}", frame),
            GpsError::MalformedRecord(msg) => write!(f, "Malformed record: {}", msg),
            GpsError::ZeroDuration => write!(f, "Zero duration between waypoints"),
            GpsError::UnsupportedFormat(ext) => write!(f, "Unsupported format: {}", ext),
        }
    }
}

impl std::error::Error for GpsError {}

impl From<std::io::Error> for GpsError {
    fn from(error: std::io::Error) -> Self {
        GpsError::Io(error)
    }
}

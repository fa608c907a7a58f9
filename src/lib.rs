// src/lib.rs
//! GPS Track Toolbox
//!
//! Decodes GPS fixes from NMEA sentences, LOCUS binary flash dumps and
//! raw decimal-degree values, collects them into tracks with distance,
//! speed and elevation aggregates, and exports tracks as KML, GPX or
//! CSV.

pub mod checksum;
pub mod coord;
pub mod error;
pub mod export;
pub mod import;
pub mod pmtk;
pub mod track;
pub mod waypoint;

// Re-export main types for convenience
pub use coord::{Axis, Hemisphere, PackedCoord};
pub use error::{GpsError, Result};
pub use import::read_track;
pub use track::Track;
pub use waypoint::Waypoint;

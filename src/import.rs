// src/import.rs
//! Bulk track import from NMEA, LOCUS, KML and GPX files
//!
//! Import is best effort: a record that fails to decode is skipped and
//! logged, never fatal. Field captures are noisy, so a readable track
//! from the surviving records beats aborting on the first bad byte.
//! I/O errors still propagate.

use crate::checksum;
use crate::error::{GpsError, Result};
use crate::track::Track;
use crate::waypoint::Waypoint;
use log::{debug, warn};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Read a track file, picking the decoder from the file extension.
///
/// Recognized extensions (case-insensitive): `nmea`, `locus`, `kml`,
/// `gpx`. Anything else fails with `UnsupportedFormat`.
pub fn read_track<P: AsRef<Path>>(path: P) -> Result<Track> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    if !matches!(extension.as_str(), "nmea" | "locus" | "kml" | "gpx") {
        return Err(GpsError::UnsupportedFormat(extension));
    }

    debug!("reading {} track from {}", extension, path.display());
    let reader = BufReader::new(File::open(path)?);
    match extension.as_str() {
        "nmea" => read_nmea(reader),
        "locus" => read_locus(reader),
        "kml" => read_kml(reader),
        _ => read_gpx(reader),
    }
}

/// Decode one NMEA sentence per line into a track.
///
/// Sentence types this crate does not decode (GSV and friends are normal
/// in a capture) are only noted at debug level; corrupt lines get a
/// warning.
pub fn read_nmea<R: BufRead>(reader: R) -> Result<Track> {
    let mut track = Track::new();
    let mut skipped = 0usize;
    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match Waypoint::from_nmea(line) {
            Ok(waypoint) => track.push(waypoint),
            Err(GpsError::UnsupportedFrame(frame)) => {
                skipped += 1;
                debug!("skipping unsupported sentence {}", frame);
            }
            Err(err) => {
                skipped += 1;
                warn!("skipping NMEA line: {}", err);
            }
        }
    }
    debug!(
        "NMEA import: {} waypoints, {} lines skipped",
        track.len(),
        skipped
    );
    Ok(track)
}

/// Decode a LOCUS flash dump into a track.
///
/// Only `$PMTKLOX,1` data lines carry records; the dump header, footer
/// and any interleaved chatter are ignored. Each data line is verified
/// against its checksum as a whole, its 8-hex-digit words turned back
/// into bytes, and the bytes chunked into 16-byte records. Records that
/// fail to decode (erased flash slots report fix code 0xFF) are skipped
/// without giving up on the rest of the line.
pub fn read_locus<R: BufRead>(reader: R) -> Result<Track> {
    let mut track = Track::new();
    let mut skipped = 0usize;
    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if !line.starts_with("$PMTKLOX,1,") {
            continue;
        }
        if !checksum::verify(line) {
            warn!("skipping LOCUS line with bad checksum");
            continue;
        }

        let payload = line.split_once('*').map_or(line, |(data, _)| data);
        // Fields 0..=2 are the sentence tag, dump type and line number
        let bytes: Option<Vec<u8>> = payload
            .split(',')
            .skip(3)
            .map(decode_hex_word)
            .collect::<Option<Vec<[u8; 4]>>>()
            .map(|words| words.concat());
        let bytes = match bytes {
            Some(bytes) => bytes,
            None => {
                warn!("skipping LOCUS line with malformed hex word");
                continue;
            }
        };

        for record in bytes.chunks_exact(16) {
            match Waypoint::from_locus_record(record) {
                Ok(waypoint) => track.push(waypoint),
                Err(err) => {
                    skipped += 1;
                    debug!("skipping LOCUS record: {}", err);
                }
            }
        }
    }
    debug!(
        "LOCUS import: {} waypoints, {} records skipped",
        track.len(),
        skipped
    );
    Ok(track)
}

/// Decode the `<coordinates>` block of a KML LineString into a track.
///
/// This reads the layout `to_kml` writes: `lon,lat,alt` triples between
/// the coordinate markers. KML coordinates carry no timestamps.
pub fn read_kml<R: BufRead>(reader: R) -> Result<Track> {
    let mut track = Track::new();
    let mut in_coordinates = false;
    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.contains("</coordinates>") {
            in_coordinates = false;
            continue;
        }
        if line.contains("<coordinates>") {
            in_coordinates = true;
            continue;
        }
        if !in_coordinates {
            continue;
        }
        for triple in line.split_whitespace() {
            match parse_kml_triple(triple) {
                Ok(waypoint) => track.push(waypoint),
                Err(err) => warn!("skipping KML coordinate {:?}: {}", triple, err),
            }
        }
    }
    debug!("KML import: {} waypoints", track.len());
    Ok(track)
}

/// Decode the `<trkpt>` elements of a GPX file into a track.
///
/// This reads the layout `to_gpx` writes: `lat`/`lon` attributes on the
/// point element plus a nested `<ele>` altitude.
pub fn read_gpx<R: BufRead>(reader: R) -> Result<Track> {
    let mut track = Track::new();
    let mut point: Option<(f64, f64)> = None;
    let mut elevation: Option<f64> = None;
    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.contains("<trkpt") {
            let lat = xml_attr(line, "lat").and_then(|value| value.parse::<f64>().ok());
            let lon = xml_attr(line, "lon").and_then(|value| value.parse::<f64>().ok());
            match (lat, lon) {
                (Some(lat), Some(lon)) => point = Some((lat, lon)),
                _ => warn!("skipping trkpt with bad attributes: {}", line),
            }
            elevation = None;
        } else if line.starts_with("<ele>") {
            elevation = line
                .trim_start_matches("<ele>")
                .trim_end_matches("</ele>")
                .parse::<f64>()
                .ok();
        } else if line.contains("</trkpt>") {
            if let Some((lat, lon)) = point.take() {
                match Waypoint::from_decimal_degrees(lat, lon, elevation, None) {
                    Ok(waypoint) => track.push(waypoint),
                    Err(err) => warn!("skipping trkpt: {}", err),
                }
            }
            elevation = None;
        }
    }
    debug!("GPX import: {} waypoints", track.len());
    Ok(track)
}

/// One LOCUS dump word: eight hex digits, four bytes in log order.
fn decode_hex_word(word: &str) -> Option<[u8; 4]> {
    if word.len() != 8 {
        return None;
    }
    let mut quad = [0u8; 4];
    for (i, byte) in quad.iter_mut().enumerate() {
        *byte = u8::from_str_radix(word.get(i * 2..i * 2 + 2)?, 16).ok()?;
    }
    Some(quad)
}

/// One KML coordinate tuple: `lon,lat,alt`, with the altitude optional.
fn parse_kml_triple(triple: &str) -> Result<Waypoint> {
    let bad = || GpsError::MalformedRecord(format!("bad KML coordinate {:?}", triple));
    let mut fields = triple.split(',');
    let lon = fields.next().ok_or_else(bad)?.parse::<f64>().map_err(|_| bad())?;
    let lat = fields.next().ok_or_else(bad)?.parse::<f64>().map_err(|_| bad())?;
    let altitude = match fields.next() {
        Some(field) => Some(field.parse::<f64>().map_err(|_| bad())?),
        None => None,
    };
    Waypoint::from_decimal_degrees(lat, lon, altitude, None)
}

fn xml_attr<'a>(line: &'a str, name: &str) -> Option<&'a str> {
    let marker = format!("{}=\"", name);
    let start = line.find(&marker)? + marker.len();
    let end = line[start..].find('"')? + start;
    Some(&line[start..end])
}

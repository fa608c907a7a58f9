// src/coord.rs
//! Coordinate representations and conversions
//!
//! Positions move between three forms: the packed degree-minute strings
//! used by NMEA sentences ("ddmm.ssss" / "dddmm.ssss" plus a hemisphere
//! letter), signed decimal degrees for all math and export paths, and the
//! raw IEEE-754 single-precision words found in LOCUS flash records.

use crate::error::{GpsError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    Latitude,
    Longitude,
}

impl Axis {
    pub fn name(&self) -> &'static str {
        match self {
            Axis::Latitude => "latitude",
            Axis::Longitude => "longitude",
        }
    }

    fn degree_width(&self) -> usize {
        match self {
            Axis::Latitude => 2,
            Axis::Longitude => 3,
        }
    }

    fn limit(&self) -> f64 {
        match self {
            Axis::Latitude => 90.0,
            Axis::Longitude => 180.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Hemisphere {
    North,
    South,
    East,
    West,
}

impl Hemisphere {
    pub fn letter(&self) -> char {
        match self {
            Hemisphere::North => 'N',
            Hemisphere::South => 'S',
            Hemisphere::East => 'E',
            Hemisphere::West => 'W',
        }
    }

    pub fn from_letter(letter: &str) -> Result<Self> {
        match letter {
            "N" => Ok(Hemisphere::North),
            "S" => Ok(Hemisphere::South),
            "E" => Ok(Hemisphere::East),
            "W" => Ok(Hemisphere::West),
            other => Err(GpsError::MalformedRecord(format!(
                "unknown hemisphere letter {:?}",
                other
            ))),
        }
    }

    pub fn axis(&self) -> Axis {
        match self {
            Hemisphere::North | Hemisphere::South => Axis::Latitude,
            Hemisphere::East | Hemisphere::West => Axis::Longitude,
        }
    }

    fn is_negative(&self) -> bool {
        matches!(self, Hemisphere::South | Hemisphere::West)
    }

    fn from_sign(axis: Axis, negative: bool) -> Self {
        match (axis, negative) {
            (Axis::Latitude, false) => Hemisphere::North,
            (Axis::Latitude, true) => Hemisphere::South,
            (Axis::Longitude, false) => Hemisphere::East,
            (Axis::Longitude, true) => Hemisphere::West,
        }
    }
}

/// A coordinate in packed degree-minute form with its decimal value.
///
/// The decimal value is always the one parsed back from the packed text,
/// so a coordinate built from decimal degrees carries the packed-string
/// round trip (the minute fraction is truncated to four digits, bounding
/// the error at 1e-4 minute).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackedCoord {
    text: String,
    hemisphere: Hemisphere,
    degrees: f64,
}

impl PackedCoord {
    /// Build from packed text and a hemisphere letter's meaning.
    ///
    /// The hemisphere selects the axis and with it the expected degree
    /// field width (2 for latitude, 3 for longitude).
    pub fn new(text: &str, hemisphere: Hemisphere) -> Result<Self> {
        let unsigned = parse_packed(text, hemisphere.axis())?;
        let degrees = if hemisphere.is_negative() { -unsigned } else { unsigned };
        Ok(Self {
            text: text.to_string(),
            hemisphere,
            degrees,
        })
    }

    /// Build from signed decimal degrees, encoding the packed text.
    pub fn from_decimal_degrees(degrees: f64, axis: Axis) -> Result<Self> {
        let text = encode_packed(degrees, axis)?;
        Self::new(&text, Hemisphere::from_sign(axis, degrees < 0.0))
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn hemisphere(&self) -> Hemisphere {
        self.hemisphere
    }

    /// Signed decimal degrees, negative in the southern/western hemisphere.
    pub fn decimal_degrees(&self) -> f64 {
        self.degrees
    }
}

impl fmt::Display for PackedCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.text, self.hemisphere.letter())
    }
}

/// Parse "ddmm.ssss" / "dddmm.ssss" text into unsigned decimal degrees.
fn parse_packed(text: &str, axis: Axis) -> Result<f64> {
    let (head, frac) = text.split_once('.').ok_or_else(|| {
        GpsError::MalformedRecord(format!("no decimal point in coordinate {:?}", text))
    })?;

    let width = axis.degree_width();
    if head.len() != width + 2 || !head.bytes().all(|b| b.is_ascii_digit()) {
        return Err(GpsError::MalformedRecord(format!(
            "bad {} degree/minute field {:?}",
            axis.name(),
            text
        )));
    }
    if frac.is_empty() || !frac.bytes().all(|b| b.is_ascii_digit()) {
        return Err(GpsError::MalformedRecord(format!(
            "bad minute fraction in coordinate {:?}",
            text
        )));
    }

    let parse = |s: &str| {
        s.parse::<f64>()
            .map_err(|_| GpsError::MalformedRecord(format!("unparsable coordinate {:?}", text)))
    };
    let degrees = parse(&head[..width])?;
    let minutes = parse(&head[width..])?;
    let seconds = parse(&format!("0.{}", frac))? * 60.0;

    Ok(degrees + minutes / 60.0 + seconds / 3600.0)
}

/// Encode decimal degrees as packed text, truncating the minute fraction
/// to four digits.
fn encode_packed(degrees: f64, axis: Axis) -> Result<String> {
    if !degrees.is_finite() || degrees.abs() > axis.limit() {
        return Err(GpsError::MalformedRecord(format!(
            "{} {} out of range",
            axis.name(),
            degrees
        )));
    }

    let mag = degrees.abs();
    let d = mag.trunc() as u32;
    let m = ((mag * 60.0) % 60.0).trunc() as u32;
    let s = (mag * 3600.0) % 60.0;
    let frac = ((s / 60.0) % 1.0 * 10000.0).trunc() as u32;

    Ok(match axis {
        Axis::Latitude => format!("{:02}{:02}.{:04}", d, m, frac),
        Axis::Longitude => format!("{:03}{:02}.{:04}", d, m, frac),
    })
}

/// Decode an IEEE-754 single-precision value from four little-endian bytes.
///
/// LOCUS records store positions as raw float words, so the bit pattern is
/// taken apart by hand: sign, 8-bit biased exponent, 23-bit mantissa. A
/// zero exponent falls through to the subnormal rule (making the all-zero
/// pattern exactly 0.0) and an all-ones exponent yields infinity or NaN.
pub fn float_from_le_bytes(bytes: [u8; 4]) -> f64 {
    let bits = u32::from_le_bytes(bytes);
    let sign = if bits >> 31 == 0 { 1.0 } else { -1.0 };
    let exponent = ((bits >> 23) & 0xFF) as i32;
    let mantissa = (bits & 0x007F_FFFF) as f64;
    let scale = f64::from(1u32 << 23);

    match exponent {
        0 => sign * (mantissa / scale) * 2f64.powi(-126),
        255 => {
            if mantissa == 0.0 {
                sign * f64::INFINITY
            } else {
                f64::NAN
            }
        }
        _ => sign * (1.0 + mantissa / scale) * 2f64.powi(exponent - 127),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_float_eq::*;

    #[test]
    fn test_packed_to_decimal() {
        let lat = PackedCoord::new("4807.038", Hemisphere::North).unwrap();
        assert_float_absolute_eq!(lat.decimal_degrees(), 48.1173, 1e-9);

        let lon = PackedCoord::new("01131.000", Hemisphere::East).unwrap();
        assert_float_absolute_eq!(lon.decimal_degrees(), 11.5166667, 1e-6);

        let south = PackedCoord::new("4807.038", Hemisphere::South).unwrap();
        assert!(south.decimal_degrees() < 0.0);
        let west = PackedCoord::new("01131.000", Hemisphere::West).unwrap();
        assert!(west.decimal_degrees() < 0.0);
    }

    #[test]
    fn test_decimal_to_packed() {
        let lat = PackedCoord::from_decimal_degrees(48.1173, Axis::Latitude).unwrap();
        assert_eq!(lat.text(), "4807.0379");
        assert_eq!(lat.hemisphere(), Hemisphere::North);

        let lon = PackedCoord::from_decimal_degrees(-11.5166667, Axis::Longitude).unwrap();
        assert_eq!(lon.text(), "01131.0000");
        assert_eq!(lon.hemisphere(), Hemisphere::West);

        let half = PackedCoord::from_decimal_degrees(10.5, Axis::Latitude).unwrap();
        assert_eq!(half.text(), "1030.0000");

        let zero = PackedCoord::from_decimal_degrees(0.0, Axis::Longitude).unwrap();
        assert_eq!(zero.text(), "00000.0000");
        assert_eq!(zero.hemisphere(), Hemisphere::East);
    }

    #[test]
    fn test_round_trip_within_tolerance() {
        for &deg in &[48.1173, -33.8675, 0.0, 89.9999, -89.9999, 12.345678] {
            let coord = PackedCoord::from_decimal_degrees(deg, Axis::Latitude).unwrap();
            assert_float_absolute_eq!(coord.decimal_degrees(), deg, 1e-4);
        }
        for &deg in &[151.2070, -75.2062849, 179.9999, -179.9999] {
            let coord = PackedCoord::from_decimal_degrees(deg, Axis::Longitude).unwrap();
            assert_float_absolute_eq!(coord.decimal_degrees(), deg, 1e-4);
        }
    }

    #[test]
    fn test_out_of_range() {
        assert!(PackedCoord::from_decimal_degrees(90.5, Axis::Latitude).is_err());
        assert!(PackedCoord::from_decimal_degrees(-91.0, Axis::Latitude).is_err());
        assert!(PackedCoord::from_decimal_degrees(180.5, Axis::Longitude).is_err());
        assert!(PackedCoord::from_decimal_degrees(f64::NAN, Axis::Latitude).is_err());
        // The poles themselves are still in range
        assert!(PackedCoord::from_decimal_degrees(90.0, Axis::Latitude).is_ok());
        assert!(PackedCoord::from_decimal_degrees(-180.0, Axis::Longitude).is_ok());
    }

    #[test]
    fn test_malformed_text() {
        assert!(PackedCoord::new("4807", Hemisphere::North).is_err());
        assert!(PackedCoord::new("480.038", Hemisphere::North).is_err());
        assert!(PackedCoord::new("48a7.038", Hemisphere::North).is_err());
        assert!(PackedCoord::new("4807.", Hemisphere::North).is_err());
        // Latitude-width text under a longitude hemisphere
        assert!(PackedCoord::new("4807.038", Hemisphere::West).is_err());
        assert!(Hemisphere::from_letter("Q").is_err());
    }

    #[test]
    fn test_float_decode_normals() {
        assert_eq!(float_from_le_bytes([0x00, 0x00, 0x80, 0x3F]), 1.0);
        assert_eq!(float_from_le_bytes([0x00, 0x00, 0x00, 0x00]), 0.0);
        assert_eq!(float_from_le_bytes([0x00, 0x00, 0x00, 0x40]), 2.0);
        assert_eq!(float_from_le_bytes([0x00, 0x00, 0xC0, 0xBF]), -1.5);
    }

    #[test]
    fn test_float_decode_edge_patterns() {
        // Smallest positive subnormal
        assert_eq!(float_from_le_bytes([0x01, 0x00, 0x00, 0x00]), 2f64.powi(-149));
        assert_eq!(float_from_le_bytes([0x00, 0x00, 0x80, 0x7F]), f64::INFINITY);
        assert_eq!(float_from_le_bytes([0x00, 0x00, 0x80, 0xFF]), f64::NEG_INFINITY);
        assert!(float_from_le_bytes([0x01, 0x00, 0x80, 0x7F]).is_nan());
    }

    #[test]
    fn test_float_decode_matches_native() {
        for bytes in [
            [0x9E, 0x69, 0x96, 0x42],
            [0xC2, 0x38, 0x89, 0xC2],
            [0xEF, 0x89, 0x20, 0x42],
        ] {
            assert_eq!(float_from_le_bytes(bytes), f32::from_le_bytes(bytes) as f64);
        }
    }
}

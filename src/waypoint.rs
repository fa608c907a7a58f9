// src/waypoint.rs
//! Waypoint decoding from NMEA sentences, LOCUS records, and raw values

use crate::checksum;
use crate::coord::{float_from_le_bytes, Axis, Hemisphere, PackedCoord};
use crate::error::{GpsError, Result};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Convert a speed over ground from knots to km/h.
///
/// Chained through miles per hour the way receiver firmware tables do it,
/// rather than as one combined factor.
pub fn knots_to_kmph(knots: f64) -> f64 {
    knots * 1.15078 * 1.60934
}

/// One decoded GPS fix, tagged by the kind of record it came from.
///
/// Each variant carries only the fields its source can populate: GGA and
/// LOCUS records have an altitude, RMC sentences a ground speed, and only
/// manually placed waypoints may lack a timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Waypoint {
    Gga {
        timestamp: DateTime<Utc>,
        latitude: PackedCoord,
        longitude: PackedCoord,
        altitude: f64,
    },
    Rmc {
        timestamp: DateTime<Utc>,
        latitude: PackedCoord,
        longitude: PackedCoord,
        /// Ground speed in km/h, converted from the knots field.
        speed: f64,
    },
    Locus {
        timestamp: DateTime<Utc>,
        latitude: PackedCoord,
        longitude: PackedCoord,
        altitude: f64,
    },
    Manual {
        latitude: PackedCoord,
        longitude: PackedCoord,
        altitude: f64,
        timestamp: Option<DateTime<Utc>>,
    },
}

impl Waypoint {
    /// Decode one NMEA sentence.
    ///
    /// The checksum is verified before any field handling; GGA sentences
    /// must report a nonzero fix quality and RMC sentences an `A` status.
    /// Sentence types other than GGA/RMC fail with `UnsupportedFrame`.
    pub fn from_nmea(line: &str) -> Result<Self> {
        let line = line.trim();
        if !checksum::verify(line) {
            return Err(GpsError::ChecksumMismatch {
                expected: checksum::checksum(line),
                found: line
                    .split_once('*')
                    .map_or(String::new(), |(_, hh)| hh.to_string()),
            });
        }

        let payload = line.split_once('*').map_or(line, |(p, _)| p);
        let parts: Vec<&str> = payload.split(',').collect();
        match parts[0] {
            "$GPGGA" => Self::from_gpgga(&parts),
            "$GPRMC" => Self::from_gprmc(&parts),
            other => Err(GpsError::UnsupportedFrame(other.to_string())),
        }
    }

    /// Decode one 16-byte LOCUS flash record.
    ///
    /// Layout: little-endian u32 epoch, fix code, two IEEE-754 single
    /// floats (latitude, longitude), little-endian u16 altitude, one
    /// padding byte. Fix codes outside 1..=4 fail with `InvalidFix`;
    /// erased flash slots show up as 0xFF there.
    pub fn from_locus_record(record: &[u8]) -> Result<Self> {
        if record.len() != 16 {
            return Err(GpsError::MalformedRecord(format!(
                "LOCUS record is {} bytes, expected 16",
                record.len()
            )));
        }

        let fix = record[4];
        if !(1..=4).contains(&fix) {
            return Err(GpsError::InvalidFix(format!("LOCUS fix code {}", fix)));
        }

        let epoch = u32::from_le_bytes([record[0], record[1], record[2], record[3]]);
        let timestamp = DateTime::from_timestamp(i64::from(epoch), 0).ok_or_else(|| {
            GpsError::MalformedRecord(format!("LOCUS timestamp {}", epoch))
        })?;

        let lat = float_from_le_bytes([record[5], record[6], record[7], record[8]]);
        let lon = float_from_le_bytes([record[9], record[10], record[11], record[12]]);
        let altitude = f64::from(u16::from_le_bytes([record[13], record[14]]));

        Ok(Waypoint::Locus {
            timestamp,
            latitude: PackedCoord::from_decimal_degrees(lat, Axis::Latitude)?,
            longitude: PackedCoord::from_decimal_degrees(lon, Axis::Longitude)?,
            altitude,
        })
    }

    /// Build a waypoint from explicit decimal-degree values.
    pub fn from_decimal_degrees(
        latitude: f64,
        longitude: f64,
        altitude: Option<f64>,
        timestamp: Option<DateTime<Utc>>,
    ) -> Result<Self> {
        Ok(Waypoint::Manual {
            latitude: PackedCoord::from_decimal_degrees(latitude, Axis::Latitude)?,
            longitude: PackedCoord::from_decimal_degrees(longitude, Axis::Longitude)?,
            altitude: altitude.unwrap_or(0.0),
            timestamp,
        })
    }

    fn from_gpgga(parts: &[&str]) -> Result<Self> {
        if parts.len() < 10 {
            return Err(GpsError::MalformedRecord(format!(
                "GGA sentence has {} fields",
                parts.len()
            )));
        }
        if parts[6] == "0" {
            return Err(GpsError::InvalidFix("GGA fix quality 0".to_string()));
        }

        // GGA carries no date, only a time of day
        let time = parse_time_field(parts[1])?;
        let timestamp = Utc::now().date_naive().and_time(time).and_utc();

        let latitude = PackedCoord::new(parts[2], Hemisphere::from_letter(parts[3])?)?;
        let longitude = PackedCoord::new(parts[4], Hemisphere::from_letter(parts[5])?)?;
        let altitude = parts[9].parse::<f64>().map_err(|_| {
            GpsError::MalformedRecord(format!("bad altitude field {:?}", parts[9]))
        })?;

        Ok(Waypoint::Gga {
            timestamp,
            latitude,
            longitude,
            altitude,
        })
    }

    fn from_gprmc(parts: &[&str]) -> Result<Self> {
        if parts.len() < 10 {
            return Err(GpsError::MalformedRecord(format!(
                "RMC sentence has {} fields",
                parts.len()
            )));
        }
        if parts[2] != "A" {
            return Err(GpsError::InvalidFix(format!("RMC status {:?}", parts[2])));
        }

        let time = parse_time_field(parts[1])?;
        let date = parse_date_field(parts[9])?;
        let latitude = PackedCoord::new(parts[3], Hemisphere::from_letter(parts[4])?)?;
        let longitude = PackedCoord::new(parts[5], Hemisphere::from_letter(parts[6])?)?;
        let knots = parts[7].parse::<f64>().map_err(|_| {
            GpsError::MalformedRecord(format!("bad speed field {:?}", parts[7]))
        })?;

        Ok(Waypoint::Rmc {
            timestamp: date.and_time(time).and_utc(),
            latitude,
            longitude,
            speed: knots_to_kmph(knots),
        })
    }

    /// Latitude in signed decimal degrees.
    pub fn latitude(&self) -> f64 {
        self.packed_latitude().decimal_degrees()
    }

    /// Longitude in signed decimal degrees.
    pub fn longitude(&self) -> f64 {
        self.packed_longitude().decimal_degrees()
    }

    pub fn packed_latitude(&self) -> &PackedCoord {
        match self {
            Waypoint::Gga { latitude, .. }
            | Waypoint::Rmc { latitude, .. }
            | Waypoint::Locus { latitude, .. }
            | Waypoint::Manual { latitude, .. } => latitude,
        }
    }

    pub fn packed_longitude(&self) -> &PackedCoord {
        match self {
            Waypoint::Gga { longitude, .. }
            | Waypoint::Rmc { longitude, .. }
            | Waypoint::Locus { longitude, .. }
            | Waypoint::Manual { longitude, .. } => longitude,
        }
    }

    /// Altitude in meters; 0 for sources that do not carry one.
    pub fn altitude(&self) -> f64 {
        match self {
            Waypoint::Gga { altitude, .. }
            | Waypoint::Locus { altitude, .. }
            | Waypoint::Manual { altitude, .. } => *altitude,
            Waypoint::Rmc { .. } => 0.0,
        }
    }

    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            Waypoint::Gga { timestamp, .. }
            | Waypoint::Rmc { timestamp, .. }
            | Waypoint::Locus { timestamp, .. } => Some(*timestamp),
            Waypoint::Manual { timestamp, .. } => *timestamp,
        }
    }

    /// Ground speed in km/h, present only on RMC waypoints.
    pub fn speed_kmh(&self) -> Option<f64> {
        match self {
            Waypoint::Rmc { speed, .. } => Some(*speed),
            _ => None,
        }
    }

    /// Great-circle distance to another waypoint in meters (Haversine).
    pub fn distance_to(&self, other: &Waypoint) -> f64 {
        let phi1 = self.latitude().to_radians();
        let phi2 = other.latitude().to_radians();
        let dlat = (other.latitude() - self.latitude()).to_radians();
        let dlon = (other.longitude() - self.longitude()).to_radians();
        let a = (dlat / 2.0).sin().powi(2)
            + phi1.cos() * phi2.cos() * (dlon / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_M * a.sqrt().asin()
    }
}

impl fmt::Display for Waypoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}, {} m",
            self.packed_latitude(),
            self.packed_longitude(),
            self.altitude()
        )?;
        if let Some(ts) = self.timestamp() {
            write!(f, " at {}", ts)?;
        }
        Ok(())
    }
}

/// Parse an NMEA `hhmmss.ss` time-of-day field.
fn parse_time_field(field: &str) -> Result<NaiveTime> {
    let bad = || GpsError::MalformedRecord(format!("bad time field {:?}", field));
    if field.len() < 6 || !field.is_ascii() {
        return Err(bad());
    }
    let (whole, frac) = field.split_at(6);
    let hh = whole[..2].parse::<u32>().map_err(|_| bad())?;
    let mm = whole[2..4].parse::<u32>().map_err(|_| bad())?;
    let ss = whole[4..6].parse::<u32>().map_err(|_| bad())?;
    let milli = if frac.is_empty() {
        0
    } else {
        let sub = format!("0{}", frac).parse::<f64>().map_err(|_| bad())?;
        (sub * 1000.0) as u32
    };
    NaiveTime::from_hms_milli_opt(hh, mm, ss, milli).ok_or_else(bad)
}

/// Parse an NMEA `ddmmyy` date field; two-digit years land in 20xx.
fn parse_date_field(field: &str) -> Result<NaiveDate> {
    let bad = || GpsError::MalformedRecord(format!("bad date field {:?}", field));
    if field.len() != 6 || !field.is_ascii() {
        return Err(bad());
    }
    let dd = field[..2].parse::<u32>().map_err(|_| bad())?;
    let mm = field[2..4].parse::<u32>().map_err(|_| bad())?;
    let yy = field[4..6].parse::<i32>().map_err(|_| bad())?;
    NaiveDate::from_ymd_opt(2000 + yy, mm, dd).ok_or_else(bad)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_float_eq::*;
    use chrono::TimeZone;

    const GGA: &str = "$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47";
    const RMC: &str = "$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*6A";

    #[test]
    fn test_gpgga_decoding() {
        let wp = Waypoint::from_nmea(GGA).unwrap();
        assert_float_absolute_eq!(wp.latitude(), 48.1173, 1e-6);
        assert_float_absolute_eq!(wp.longitude(), 11.5166667, 1e-6);
        assert_eq!(wp.altitude(), 545.4);
        assert_eq!(wp.speed_kmh(), None);
        // GGA has no date; the time of day comes from the sentence
        let ts = wp.timestamp().unwrap();
        assert_eq!(ts.time(), NaiveTime::from_hms_opt(12, 35, 19).unwrap());
    }

    #[test]
    fn test_gprmc_decoding() {
        let wp = Waypoint::from_nmea(RMC).unwrap();
        assert_float_absolute_eq!(wp.latitude(), 48.1173, 1e-6);
        assert_float_absolute_eq!(wp.speed_kmh().unwrap(), 41.4847168, 1e-6);
        assert_eq!(
            wp.timestamp().unwrap(),
            Utc.with_ymd_and_hms(2094, 3, 23, 12, 35, 19).unwrap()
        );
    }

    #[test]
    fn test_checksum_rejected() {
        let line = "$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*00";
        match Waypoint::from_nmea(line) {
            Err(GpsError::ChecksumMismatch { expected, found }) => {
                assert_eq!(expected, "47");
                assert_eq!(found, "00");
            }
            other => panic!("expected checksum mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_rmc_void_status() {
        let line = "$GPRMC,123519,V,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*7D";
        assert!(matches!(
            Waypoint::from_nmea(line),
            Err(GpsError::InvalidFix(_))
        ));
    }

    #[test]
    fn test_gga_quality_zero() {
        let line = "$GPGGA,123519,4807.038,N,01131.000,E,0,08,0.9,545.4,M,46.9,M,,*46";
        assert!(matches!(
            Waypoint::from_nmea(line),
            Err(GpsError::InvalidFix(_))
        ));
    }

    #[test]
    fn test_unsupported_sentence() {
        let line = "$GPGSV,3,1,12,01,40,083,46,02,17,308,41,12,07,344,39,14,22,228,45*7F";
        match Waypoint::from_nmea(line) {
            Err(GpsError::UnsupportedFrame(frame)) => assert_eq!(frame, "$GPGSV"),
            other => panic!("expected unsupported frame, got {:?}", other),
        }
    }

    #[test]
    fn test_locus_record_decoding() {
        // 2013-10-10 04:52:25 UTC, fix 2, 40.1347017 N, 75.2062849 W, 56 m
        let record: [u8; 16] = [
            137, 50, 86, 82, 2, 239, 137, 32, 66, 158, 105, 150, 194, 56, 0, 0,
        ];
        let wp = Waypoint::from_locus_record(&record).unwrap();
        assert_float_absolute_eq!(wp.latitude(), 40.1347017, 1e-4);
        assert_float_absolute_eq!(wp.longitude(), -75.2062849, 1e-4);
        assert_eq!(wp.altitude(), 56.0);
        assert_eq!(wp.timestamp().unwrap().timestamp(), 1381380745);
    }

    #[test]
    fn test_locus_fix_codes() {
        let mut record: [u8; 16] = [
            137, 50, 86, 82, 2, 239, 137, 32, 66, 158, 105, 150, 194, 56, 0, 0,
        ];
        for fix in [1u8, 2, 3, 4] {
            record[4] = fix;
            assert!(Waypoint::from_locus_record(&record).is_ok());
        }
        for fix in [0u8, 5, 0xFF] {
            record[4] = fix;
            assert!(matches!(
                Waypoint::from_locus_record(&record),
                Err(GpsError::InvalidFix(_))
            ));
        }
    }

    #[test]
    fn test_locus_record_wrong_length() {
        let record = [0u8; 15];
        assert!(matches!(
            Waypoint::from_locus_record(&record),
            Err(GpsError::MalformedRecord(_))
        ));
    }

    #[test]
    fn test_from_decimal_degrees() {
        let wp = Waypoint::from_decimal_degrees(48.1173, -71.1193, None, None).unwrap();
        assert_float_absolute_eq!(wp.latitude(), 48.1173, 1e-4);
        assert_float_absolute_eq!(wp.longitude(), -71.1193, 1e-4);
        assert_eq!(wp.altitude(), 0.0);
        assert_eq!(wp.timestamp(), None);
        assert_eq!(wp.packed_latitude().hemisphere(), Hemisphere::North);
        assert_eq!(wp.packed_longitude().hemisphere(), Hemisphere::West);
    }

    #[test]
    fn test_knots_conversion() {
        assert_float_absolute_eq!(knots_to_kmph(22.4), 41.4847168, 1e-6);
        assert_eq!(knots_to_kmph(0.0), 0.0);
    }

    #[test]
    fn test_haversine_distance() {
        let origin = Waypoint::from_decimal_degrees(0.0, 0.0, None, None).unwrap();
        let east = Waypoint::from_decimal_degrees(0.0, 1.0, None, None).unwrap();
        assert_float_absolute_eq!(origin.distance_to(&east), 111_195.0, 50.0);
        assert_eq!(origin.distance_to(&origin), 0.0);
        // Symmetric either way around
        assert_float_absolute_eq!(
            origin.distance_to(&east),
            east.distance_to(&origin),
            1e-9
        );
    }
}

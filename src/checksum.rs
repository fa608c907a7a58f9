// src/checksum.rs
//! NMEA/PMTK sentence checksum handling

/// Compute the two-digit XOR checksum for a sentence.
///
/// The checksum covers the payload between the leading `$` and the `*`
/// marker, excluding both. Lines without a `*` are summed to the end,
/// which is how outgoing sentences are built before the suffix exists.
pub fn checksum(line: &str) -> String {
    let line = line.trim_end();
    let end = line.find('*').unwrap_or(line.len());
    let payload = line.get(1..end).unwrap_or("");
    let sum = payload.bytes().fold(0u8, |acc, b| acc ^ b);
    format!("{:02X}", sum)
}

/// Check a complete `$...*HH` record against its own checksum suffix.
///
/// Records with no `*HH` suffix never verify.
pub fn verify(line: &str) -> bool {
    let line = line.trim_end();
    match line.split_once('*') {
        Some((_, suffix)) => suffix == checksum(line),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gpgga_checksum() {
        let line = "$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47";
        assert_eq!(checksum(line), "47");
        assert!(verify(line));
    }

    #[test]
    fn test_gprmc_checksum() {
        assert!(verify(
            "$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*6A"
        ));
    }

    #[test]
    fn test_locus_line_checksum() {
        assert!(verify(
            "$PMTKLOX,1,0,89325652,02EF8920,429E6996,C2380000*5E"
        ));
    }

    #[test]
    fn test_corrupted_payload() {
        // One digit flipped relative to the valid GGA line above
        let line = "$GPGGA,123520,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47";
        assert!(!verify(line));
    }

    #[test]
    fn test_missing_suffix() {
        assert!(!verify("$GPGGA,123519,4807.038,N"));
        assert!(!verify(""));
    }

    #[test]
    fn test_trailing_newline_ignored() {
        assert!(verify(
            "$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47\n"
        ));
    }
}

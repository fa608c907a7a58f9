// src/export.rs
//! Track export to KML, GPX and CSV
//!
//! The encoders are pure: they borrow a track and return the document
//! text. Coordinates are always converted back to decimal degrees and
//! written with six decimal places, whatever representation the track
//! was imported from. An empty track still yields a valid document.

use crate::error::Result;
use crate::track::Track;
use std::fs;
use std::path::Path;

/// Render a track as a KML LineString placemark.
pub fn to_kml(track: &Track) -> String {
    let mut kml = String::from(r#"<?xml version="1.0" encoding="UTF-8"?>
<kml xmlns="http://earth.google.com/kml/2.2" xmlns:gx="http://www.google.com/kml/ext/2.2">
<Folder>
"#);
    kml.push_str("\t<name>GPS Track</name>\n");
    kml.push_str("\t<Placemark>\n");
    kml.push_str("\t\t<name>Track</name>\n");
    kml.push_str("\t\t<Style>\n");
    kml.push_str("\t\t\t<LineStyle>\n");
    kml.push_str("\t\t\t\t<color>00cc00cc</color>\n");
    kml.push_str("\t\t\t\t<width>4</width>\n");
    kml.push_str("\t\t\t</LineStyle>\n");
    kml.push_str("\t\t</Style>\n");
    kml.push_str("\t\t<LineString>\n");
    kml.push_str("\t\t\t<altitudeMode>relativeToGround</altitudeMode>\n");
    kml.push_str("\t\t\t<coordinates>\n");

    // KML wants lon,lat,alt order
    for waypoint in track.iter() {
        kml.push_str(&format!(
            "\t\t\t\t{:.6},{:.6},{}\n",
            waypoint.longitude(),
            waypoint.latitude(),
            waypoint.altitude()
        ));
    }

    kml.push_str("\t\t\t</coordinates>\n");
    kml.push_str("\t\t</LineString>\n");
    kml.push_str("\t</Placemark>\n");
    kml.push_str("</Folder>\n</kml>\n");
    kml
}

/// Render a track as a GPX track segment.
pub fn to_gpx(track: &Track) -> String {
    let mut gpx = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    gpx.push_str("<gpx version=\"1.0\" xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\"\n");
    gpx.push_str(" xmlns=\"http://www.topografix.com/GPX/1/0\"\n");
    gpx.push_str(" xsi:schemaLocation=\"http://www.topografix.com/GPX/1/0 http://www.topografix.com/GPX/1/0/gpx.xsd\">\n");
    gpx.push_str("\t<name>GPS Track</name>\n");
    gpx.push_str("\t<trk>\n\t\t<name>GPS Track</name>\n\t\t<number>1</number>\n\t\t<trkseg>\n");

    for waypoint in track.iter() {
        gpx.push_str(&format!(
            "\t\t\t<trkpt lat=\"{:.6}\" lon=\"{:.6}\">\n",
            waypoint.latitude(),
            waypoint.longitude()
        ));
        gpx.push_str(&format!("\t\t\t\t<ele>{}</ele>\n", waypoint.altitude()));
        gpx.push_str("\t\t\t</trkpt>\n");
    }

    gpx.push_str("\t\t</trkseg>\n\t</trk>\n</gpx>\n");
    gpx
}

/// Render a track as CSV with a `lat,lon,alt` header row.
pub fn to_csv(track: &Track) -> String {
    let mut csv = String::from("lat,lon,alt\n");
    for waypoint in track.iter() {
        csv.push_str(&format!(
            "{:.6},{:.6},{}\n",
            waypoint.latitude(),
            waypoint.longitude(),
            waypoint.altitude()
        ));
    }
    csv
}

/// Write the KML rendering of a track to a file.
pub fn write_kml<P: AsRef<Path>>(track: &Track, path: P) -> Result<()> {
    fs::write(path, to_kml(track))?;
    Ok(())
}

/// Write the GPX rendering of a track to a file.
pub fn write_gpx<P: AsRef<Path>>(track: &Track, path: P) -> Result<()> {
    fs::write(path, to_gpx(track))?;
    Ok(())
}

/// Write the CSV rendering of a track to a file.
pub fn write_csv<P: AsRef<Path>>(track: &Track, path: P) -> Result<()> {
    fs::write(path, to_csv(track))?;
    Ok(())
}

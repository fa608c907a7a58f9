// src/pmtk.rs
//! PMTK command sentences for MediaTek GPS modules
//!
//! The static command set a device link sends to configure the receiver
//! and drive the LOCUS logger, plus the acknowledgement sentences it
//! matches against. Constants are complete `$...*HH` sentences without a
//! line terminator; append CR LF when writing to the port.

// NMEA update rates (position output interval)
pub const PMTK_SET_NMEA_UPDATE_100_MILLIHERTZ: &str = "$PMTK220,10000*2F";
pub const PMTK_SET_NMEA_UPDATE_200_MILLIHERTZ: &str = "$PMTK220,5000*1B";
pub const PMTK_SET_NMEA_UPDATE_1HZ: &str = "$PMTK220,1000*1F";
pub const PMTK_SET_NMEA_UPDATE_2HZ: &str = "$PMTK220,500*2B";
pub const PMTK_SET_NMEA_UPDATE_5HZ: &str = "$PMTK220,200*2C";
pub const PMTK_SET_NMEA_UPDATE_10HZ: &str = "$PMTK220,100*2F";

// Fix computation rates
pub const PMTK_API_Q_FIX_CTL: &str = "$PMTK400*36";
pub const PMTK_API_SET_FIX_CTL_100_MILLIHERTZ: &str = "$PMTK300,10000,0,0,0,0*2C";
pub const PMTK_API_SET_FIX_CTL_200_MILLIHERTZ: &str = "$PMTK300,5000,0,0,0,0*18";
pub const PMTK_API_SET_FIX_CTL_1HZ: &str = "$PMTK300,1000,0,0,0,0*1C";
pub const PMTK_API_SET_FIX_CTL_5HZ: &str = "$PMTK300,200,0,0,0,0*2F";

// Serial baud rate selection
pub const PMTK_SET_BAUD_57600: &str = "$PMTK251,57600*2C";
pub const PMTK_SET_BAUD_9600: &str = "$PMTK251,9600*17";

// NMEA sentence output masks
pub const PMTK_SET_NMEA_OUTPUT_RMC_ONLY: &str =
    "$PMTK314,0,1,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0*29";
pub const PMTK_SET_NMEA_OUTPUT_RMC_GGA: &str =
    "$PMTK314,0,1,0,1,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0*28";
pub const PMTK_SET_NMEA_OUTPUT_ALL_DATA: &str =
    "$PMTK314,1,1,1,1,1,1,0,0,0,0,0,0,0,0,0,0,0,0,0*28";
pub const PMTK_SET_NMEA_OUTPUT_OFF: &str =
    "$PMTK314,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0*28";

// LOCUS logger control
pub const PMTK_START_LOG: &str = "$PMTK185,0*22";
pub const PMTK_STOP_LOG: &str = "$PMTK185,1*23";
pub const PMTK_QUERY_LOG_STATUS: &str = "$PMTK183*38";
pub const PMTK_DUMP_FLASH: &str = "$PMTK622,1*29";
pub const PMTK_ERASE_FLASH: &str = "$PMTK184,1*22";

// LOCUS logging intervals
pub const PMTK_LOCUS_1_SECONDS: &str = "$PMTK187,1,1*3C";
pub const PMTK_LOCUS_5_SECONDS: &str = "$PMTK187,1,5*38";
pub const PMTK_LOCUS_15_SECONDS: &str = "$PMTK187,1,15*09";

// Augmentation systems
pub const PMTK_ENABLE_SBAS: &str = "$PMTK313,1*2E";
pub const PMTK_ENABLE_WAAS: &str = "$PMTK301,2*2E";

// Power state and firmware queries
pub const PMTK_STANDBY: &str = "$PMTK161,0*28";
pub const PMTK_AWAKE: &str = "$PMTK010,002*2D";
pub const PMTK_Q_RELEASE: &str = "$PMTK605*31";

// External antenna advisories
pub const PGCMD_ANTENNA: &str = "$PGCMD,33,1*6C";
pub const PGCMD_NOANTENNA: &str = "$PGCMD,33,0*6D";

// Acknowledgements the module sends back
pub const PMTK_LOG_ACK: &str = "$PMTK001,185,3*3C";
pub const PMTK_ERASE_ACK: &str = "$PMTK001,184,3*3D";
pub const PMTK_UPDATE_ACK: &str = "$PMTK001,220,3*30";
pub const PMTK_OUTPUT_ACK: &str = "$PMTK001,314,3*36";
pub const PMTK_STANDBY_SUCCESS: &str = "$PMTK001,161,3*36";

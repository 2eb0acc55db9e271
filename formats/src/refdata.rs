//! Reference tables the registries are built from.
//!
//! Two row-oriented CSV tables with named columns:
//!
//! - the aircraft type designator table (doc8643-style), one row per model,
//! - the registered aircraft table, one row per airframe.
//!
//! Loading is strict: a malformed table is fatal (`RefDataError`), no partial
//! registry is ever built from a half-read file.
//!

use std::io::Read;
use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::trace;

/// Custom error type for reference data, fatal to registry construction.
///
#[derive(Debug, Error)]
pub enum RefDataError {
    #[error("Bad reference data: {0}")]
    BadData(#[from] csv::Error),
    #[error("Empty reference table {0}")]
    EmptyTable(PathBuf),
}

/// One row of the aircraft type designator table.
///
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct TypeDesignator {
    /// Airframe category ("LandPlane", "Helicopter", …)
    #[serde(rename = "AircraftDescription")]
    pub category: String,
    /// Short type description (e.g. "L2J")
    #[serde(rename = "Description")]
    pub description: String,
    /// ICAO type designator, the join key towards registered aircraft
    #[serde(rename = "Designator")]
    pub designator: String,
    #[serde(rename = "EngineCount")]
    pub engine_count: String,
    /// "Jet", "Piston", "Turboprop/Turboshaft", …
    #[serde(rename = "EngineType")]
    pub engine_type: String,
    #[serde(rename = "ManufacturerCode")]
    pub manufacturer: String,
    #[serde(rename = "ModelFullName")]
    pub model: String,
    /// Wake turbulence category
    #[serde(rename = "WTC")]
    pub wtc: String,
}

/// One row of the registered aircraft table.
///
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct RegisteredAircraft {
    /// 24-bit transponder address as lowercase hex, unique per airframe
    pub icao24: String,
    /// Tail number
    pub registration: String,
    /// Country of registration
    pub country: String,
    /// ICAO type designator
    pub typecode: String,
}

/// Read the type designator table from `fname`.
///
#[tracing::instrument]
pub fn load_types(fname: &Path) -> Result<Vec<TypeDesignator>, RefDataError> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(fname)?;
    let rows = rdr
        .deserialize()
        .collect::<Result<Vec<TypeDesignator>, _>>()?;
    if rows.is_empty() {
        return Err(RefDataError::EmptyTable(fname.to_path_buf()));
    }
    trace!("{} type designators", rows.len());
    Ok(rows)
}

/// Read the registered aircraft table from `fname`.
///
#[tracing::instrument]
pub fn load_registered(fname: &Path) -> Result<Vec<RegisteredAircraft>, RefDataError> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(fname)?;
    let rows = rdr
        .deserialize()
        .collect::<Result<Vec<RegisteredAircraft>, _>>()?;
    if rows.is_empty() {
        return Err(RefDataError::EmptyTable(fname.to_path_buf()));
    }
    trace!("{} registered aircraft", rows.len());
    Ok(rows)
}

/// Decode type designator rows from any reader.
///
pub fn parse_types<R: Read>(input: R) -> Result<Vec<TypeDesignator>, RefDataError> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(input);
    let rows = rdr
        .deserialize()
        .collect::<Result<Vec<TypeDesignator>, _>>()?;
    trace!("{} type designators", rows.len());
    Ok(rows)
}

/// Decode registered aircraft rows from any reader.
///
pub fn parse_registered<R: Read>(input: R) -> Result<Vec<RegisteredAircraft>, RefDataError> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(input);
    let rows = rdr
        .deserialize()
        .collect::<Result<Vec<RegisteredAircraft>, _>>()?;
    trace!("{} registered aircraft", rows.len());
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TYPES: &str = r##"AircraftDescription,Description,Designator,EngineCount,EngineType,ManufacturerCode,ModelFullName,WTC
LandPlane,L2J,GLF6,2,Jet,GULFSTREAM,G-VI Gulfstream G650,M
LandPlane,L2J,RAFL,1,Jet,DASSAULT,Rafale B,M
"##;

    const REGISTERED: &str = r##"icao24,registration,country,typecode
4b1804,HB-JSG,Switzerland,GLF6
39856a,F-HGYM,France,C68A
"##;

    #[test]
    fn test_parse_types() {
        let rows = parse_types(TYPES.as_bytes()).unwrap();

        assert_eq!(2, rows.len());
        assert_eq!("GLF6", rows[0].designator);
        assert_eq!("GULFSTREAM", rows[0].manufacturer);
        assert_eq!("G-VI Gulfstream G650", rows[0].model);
    }

    #[test]
    fn test_parse_registered() {
        let rows = parse_registered(REGISTERED.as_bytes()).unwrap();

        assert_eq!(2, rows.len());
        assert_eq!("4b1804", rows[0].icao24);
        assert_eq!("HB-JSG", rows[0].registration);
        assert_eq!("Switzerland", rows[0].country);
        assert_eq!("GLF6", rows[0].typecode);
    }

    #[test]
    fn test_parse_types_malformed() {
        let bad = "AircraftDescription,Description\nLandPlane";
        assert!(parse_types(bad.as_bytes()).is_err());
    }

    #[test]
    fn test_load_types_missing_file() {
        let r = load_types(Path::new("/nonexistent/doc8643.csv"));
        assert!(r.is_err());
    }
}

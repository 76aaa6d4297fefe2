//! Setup files: roster CSV (`id,name,region`) and seeding JSON.

use crate::models::{validate_roster, Entrant, Region, SeedingConfig, TournamentError};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

/// Errors while reading setup files or stored snapshots.
#[derive(Debug)]
pub enum LoadError {
    Io(std::io::Error),
    Csv(csv::Error),
    Json(serde_json::Error),
    /// Roster row with a region outside LCK, LPL, LCP, LEC, LCS. Rows count from 1.
    InvalidRegion { row: usize, value: String },
    /// Files parsed but the content breaks a tournament rule.
    Invalid(TournamentError),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Io(e) => write!(f, "I/O error: {}", e),
            LoadError::Csv(e) => write!(f, "Roster CSV error: {}", e),
            LoadError::Json(e) => write!(f, "JSON error: {}", e),
            LoadError::InvalidRegion { row, value } => {
                write!(f, "Roster row {} has unknown region \"{}\"", row, value)
            }
            LoadError::Invalid(e) => write!(f, "Invalid setup: {}", e),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(e) => Some(e),
            LoadError::Csv(e) => Some(e),
            LoadError::Json(e) => Some(e),
            LoadError::Invalid(e) => Some(e),
            LoadError::InvalidRegion { .. } => None,
        }
    }
}

impl From<std::io::Error> for LoadError {
    fn from(e: std::io::Error) -> Self {
        LoadError::Io(e)
    }
}

impl From<csv::Error> for LoadError {
    fn from(e: csv::Error) -> Self {
        LoadError::Csv(e)
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(e: serde_json::Error) -> Self {
        LoadError::Json(e)
    }
}

impl From<TournamentError> for LoadError {
    fn from(e: TournamentError) -> Self {
        LoadError::Invalid(e)
    }
}

#[derive(Deserialize)]
struct RosterRow {
    id: String,
    name: String,
    region: String,
}

/// Parse roster rows. Shape rules (count, unique ids, names) are checked by [`load_setup`].
pub fn read_roster<R: Read>(reader: R) -> Result<Vec<Entrant>, LoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut roster = Vec::new();
    for (i, row) in csv_reader.deserialize::<RosterRow>().enumerate() {
        let row = row?;
        let region: Region = row.region.parse().map_err(|_| LoadError::InvalidRegion {
            row: i + 1,
            value: row.region.clone(),
        })?;
        roster.push(Entrant::new(row.id, row.name, region));
    }
    Ok(roster)
}

pub fn read_seeding<R: Read>(reader: R) -> Result<SeedingConfig, LoadError> {
    Ok(serde_json::from_reader(reader)?)
}

/// Where the setup files live.
#[derive(Clone, Debug)]
pub struct SetupPaths {
    pub roster: PathBuf,
    pub seeding: PathBuf,
}

impl Default for SetupPaths {
    fn default() -> Self {
        Self {
            roster: PathBuf::from("data/roster.csv"),
            seeding: PathBuf::from("data/seeding.json"),
        }
    }
}

/// Read and validate both setup files.
pub fn load_setup(paths: &SetupPaths) -> Result<(Vec<Entrant>, SeedingConfig), LoadError> {
    let roster = read_roster(File::open(&paths.roster)?)?;
    let seeding = read_seeding(File::open(&paths.seeding)?)?;
    validate_roster(&roster)?;
    seeding.validate(&roster)?;
    log::info!(
        "Loaded {} entrants from {} and seeding from {}",
        roster.len(),
        paths.roster.display(),
        paths.seeding.display()
    );
    Ok((roster, seeding))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roster_rows_are_trimmed_and_regions_parsed() {
        let data = "id,name,region\ngen, Gen.G ,LCK\nfnc,Fnatic,lec\n";
        let roster = read_roster(data.as_bytes()).unwrap();
        assert_eq!(roster.len(), 2);
        assert_eq!(roster[0].name, "Gen.G");
        assert_eq!(roster[1].region, Region::Lec);
    }

    #[test]
    fn unknown_region_reports_row() {
        let data = "id,name,region\ngen,Gen.G,LCK\nxyz,Xyz,LJL\n";
        match read_roster(data.as_bytes()) {
            Err(LoadError::InvalidRegion { row, value }) => {
                assert_eq!(row, 2);
                assert_eq!(value, "LJL");
            }
            other => panic!("expected InvalidRegion, got {:?}", other),
        }
    }
}

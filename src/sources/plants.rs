use super::split_fields;
use crate::error::{Result, SimError};
use crate::models::{HumidityLevel, PlantCatalog, PlantProfile, SunTolerance};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, warn};

const NAME_FIELD: usize = 0;
const HUMIDITY_FIELD: usize = 3;
const SUN_FIELD: usize = 4;
const MIN_FIELDS: usize = 5;

/// Load the plant catalog from a `;`-separated file with one header line.
pub fn load_catalog(path: &Path) -> Result<PlantCatalog> {
    let file = File::open(path).map_err(|e| SimError::source_read(path, e))?;
    let catalog = parse_catalog(BufReader::new(file))
        .map_err(|e| SimError::source_read(path, e))?;

    debug!(path = %path.display(), plants = catalog.len(), "Loaded plant catalog");
    Ok(catalog)
}

pub fn parse_catalog<R: BufRead>(reader: R) -> std::io::Result<PlantCatalog> {
    let mut catalog = PlantCatalog::new();

    // First line is the header
    for (line_no, line) in reader.lines().enumerate().skip(1) {
        let line = line?;
        match parse_row(&line) {
            Some(profile) => catalog.insert(profile),
            None => debug!(line = line_no + 1, "Skipping plant row with too few fields"),
        }
    }

    Ok(catalog)
}

fn parse_row(line: &str) -> Option<PlantProfile> {
    let fields = split_fields(line);
    if fields.len() < MIN_FIELDS {
        return None;
    }

    let name = fields[NAME_FIELD].trim();
    let humidity_raw = fields[HUMIDITY_FIELD].trim().to_lowercase();
    let sun_raw = fields[SUN_FIELD].trim().to_lowercase();

    let humidity_preference = HumidityLevel::from_str(&humidity_raw);
    if humidity_preference.is_none() {
        warn!(
            plant = %name,
            humidity = %humidity_raw,
            "Unknown humidity preference, plant will never be rated adequate"
        );
    }

    Some(PlantProfile::new(
        name,
        humidity_preference,
        SunTolerance::from_str(&sun_raw),
    ))
}

use super::split_fields;
use crate::error::{Result, SimError};
use crate::models::ReferenceTable;
use regex_lite::Regex;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

/// Load reference temperatures from a `;`-separated `time;temperature` file.
pub fn load_reference(path: &Path) -> Result<ReferenceTable> {
    let file = File::open(path).map_err(|e| SimError::source_read(path, e))?;
    let table = parse_reference(BufReader::new(file))
        .map_err(|e| SimError::source_read(path, e))?;

    debug!(path = %path.display(), entries = table.len(), "Loaded reference temperatures");
    for slot in table.missing_slots() {
        debug!(slot = %slot, "No reference temperature for slot, default will be used");
    }
    Ok(table)
}

/// Reads rows until the first empty line or end of input. Rows whose first
/// field is not an `H:MM`/`HH:MM` time or whose temperature does not parse
/// are skipped.
pub fn parse_reference<R: BufRead>(reader: R) -> std::io::Result<ReferenceTable> {
    let time_pattern = Regex::new(r"^\d{1,2}:\d{2}$").expect("time pattern is a valid regex");
    let mut table = ReferenceTable::new();

    for line in reader.lines() {
        let line = line?;
        if line.is_empty() {
            break;
        }

        let fields = split_fields(&line);
        if fields.len() < 2 || !time_pattern.is_match(fields[0]) {
            continue;
        }

        match parse_decimal(fields[1]) {
            Some(temp) => table.insert(fields[0], temp),
            None => debug!(row = %line, "Skipping reference row with bad temperature"),
        }
    }

    Ok(table)
}

/// Parse a number that may use `,` as the decimal separator.
fn parse_decimal(raw: &str) -> Option<f64> {
    raw.trim().replace(',', ".").parse::<f64>().ok()
}

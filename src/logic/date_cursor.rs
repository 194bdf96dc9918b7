use chrono::NaiveDate;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, warn};

/// Prefix of a line that introduces a date block.
pub const DATE_MARKER: &str = "Fecha";

/// Pick the first simulation date: the day after the latest date already in
/// the log, or `today` when there is no usable log.
pub fn next_start_date(log_path: &Path, today: NaiveDate) -> NaiveDate {
    let file = match File::open(log_path) {
        Ok(f) => f,
        Err(e) => {
            debug!(path = %log_path.display(), error = %e, "No simulation log, starting today");
            return today;
        }
    };

    match used_dates(BufReader::new(file)) {
        Ok(used) => next_unused_date(&used, today),
        Err(e) => {
            warn!(path = %log_path.display(), error = %e, "Failed to scan simulation log, starting today");
            today
        }
    }
}

/// Collect every date marker. Markers are either `Fecha: <date>` or a bare
/// `Fecha` line followed by the date on the next line. A bare marker directly
/// followed by another marker contributes nothing; the second one is still
/// read. Bytes that are not UTF-8 are decoded lossily, not treated as errors.
pub fn used_dates<R: BufRead>(mut reader: R) -> std::io::Result<HashSet<NaiveDate>> {
    let mut used = HashSet::new();
    let mut pending: Option<String> = None;

    loop {
        let line = match pending.take() {
            Some(line) => line,
            None => match read_line_lossy(&mut reader)? {
                Some(line) => line,
                None => break,
            },
        };
        if !line.starts_with(DATE_MARKER) {
            continue;
        }

        let date_text = match line.split_once(':') {
            Some((_, rest)) => rest.trim().to_string(),
            None => match read_line_lossy(&mut reader)? {
                Some(next) if next.starts_with(DATE_MARKER) => {
                    pending = Some(next);
                    continue;
                }
                Some(next) => next.trim().to_string(),
                None => break,
            },
        };
        if date_text.is_empty() {
            continue;
        }

        match NaiveDate::parse_from_str(&date_text, "%Y-%m-%d") {
            Ok(date) => {
                used.insert(date);
            }
            Err(e) => warn!(marker = %date_text, error = %e, "Skipping malformed date marker"),
        }
    }

    Ok(used)
}

/// Next line without its terminator, or `None` at end of input.
fn read_line_lossy<R: BufRead>(reader: &mut R) -> std::io::Result<Option<String>> {
    let mut buf = Vec::new();
    if reader.read_until(b'\n', &mut buf)? == 0 {
        return Ok(None);
    }
    if buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    }
    Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
}

/// `max(used) + 1`, advanced past any date still in `used`.
pub fn next_unused_date(used: &HashSet<NaiveDate>, today: NaiveDate) -> NaiveDate {
    let mut candidate = match used.iter().max() {
        Some(latest) => latest.succ_opt().unwrap_or(*latest),
        None => return today,
    };

    while used.contains(&candidate) {
        match candidate.succ_opt() {
            Some(next) => candidate = next,
            None => break,
        }
    }

    candidate
}

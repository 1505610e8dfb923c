use std::sync::OnceLock;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};
use regex::Regex;

use super::types::{LineChangeRecord, LoadedRows, RowRejection};
use crate::error::{FolioError, Result};

const COLUMNS: [&str; 11] = [
    "commit", "author", "date", "time", "timezone", "datetime", "file", "line", "depth", "length",
    "type",
];

/// Position of each required column in the header row, in `COLUMNS` order.
struct ColumnMap([usize; 11]);

impl ColumnMap {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self> {
        let mut positions = [0usize; 11];
        for (slot, name) in positions.iter_mut().zip(COLUMNS) {
            *slot = headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
                .ok_or(FolioError::MissingColumn(name))?;
        }
        Ok(ColumnMap(positions))
    }

    fn get<'r>(&self, record: &'r csv::StringRecord, column: usize) -> &'r str {
        record.get(self.0[column]).unwrap_or("")
    }
}

fn timezone_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(?P<sign>[+-])(?P<hours>\d{2}):?(?P<minutes>\d{2})$")
            .expect("timezone pattern is valid")
    })
}

/// Parse a UTC offset such as `-08:00`, `+0530` or `Z`.
pub fn parse_offset(raw: &str) -> Option<FixedOffset> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("z") || raw.eq_ignore_ascii_case("utc") {
        return FixedOffset::east_opt(0);
    }

    let caps = timezone_pattern().captures(raw)?;
    let hours: i32 = caps["hours"].parse().ok()?;
    let minutes: i32 = caps["minutes"].parse().ok()?;
    if minutes >= 60 {
        return None;
    }
    let seconds = hours * 3600 + minutes * 60;
    match &caps["sign"] {
        "-" => FixedOffset::west_opt(seconds),
        _ => FixedOffset::east_opt(seconds),
    }
}

/// Local midnight of `date` (YYYY-MM-DD) in the given timezone.
fn parse_local_midnight(date: &str, timezone: &str) -> Result<DateTime<FixedOffset>> {
    let offset = parse_offset(timezone).ok_or_else(|| FolioError::invalid("timezone", timezone))?;
    let day = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|_| FolioError::invalid("date", date))?;
    day.and_hms_opt(0, 0, 0)
        .and_then(|midnight| offset.from_local_datetime(&midnight).single())
        .ok_or_else(|| FolioError::invalid("date", date))
}

/// Parse an absolute timestamp. Values without an offset are read as UTC.
pub fn parse_instant(raw: &str) -> Result<DateTime<FixedOffset>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt);
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc().fixed_offset())
        .ok_or_else(|| FolioError::invalid("datetime", raw))
}

fn parse_count(field: &'static str, raw: &str) -> Result<u32> {
    raw.trim()
        .parse()
        .map_err(|_| FolioError::invalid(field, raw))
}

fn parse_record(record: &csv::StringRecord, cols: &ColumnMap) -> Result<LineChangeRecord> {
    let commit_id = cols.get(record, 0).trim();
    if commit_id.is_empty() {
        return Err(FolioError::invalid("commit", commit_id));
    }
    let timezone = cols.get(record, 4);

    Ok(LineChangeRecord {
        commit_id: commit_id.to_string(),
        author: cols.get(record, 1).to_string(),
        date: parse_local_midnight(cols.get(record, 2), timezone)?,
        time: cols.get(record, 3).to_string(),
        timezone: timezone.to_string(),
        datetime: parse_instant(cols.get(record, 5))?,
        file: cols.get(record, 6).to_string(),
        line: parse_count("line", cols.get(record, 7))?,
        depth: parse_count("depth", cols.get(record, 8))?,
        length: parse_count("length", cols.get(record, 9))?,
        line_type: cols.get(record, 10).to_string(),
    })
}

/// Parse the line-level commit CSV.
///
/// The header must name every column in `COLUMNS` (any order, extra columns
/// ignored). A data row with a malformed field is rejected and reported in
/// `LoadedRows::rejected`; it never reaches aggregation. Blank input yields
/// an empty dataset.
pub fn parse_rows(input: &str) -> Result<LoadedRows> {
    if input.trim().is_empty() {
        return Ok(LoadedRows::default());
    }

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(input.as_bytes());
    let cols = ColumnMap::from_headers(reader.headers()?)?;

    let mut loaded = LoadedRows::default();
    for (i, result) in reader.records().enumerate() {
        let row = i + 1;
        let parsed = result
            .map_err(FolioError::from)
            .and_then(|record| parse_record(&record, &cols));
        match parsed {
            Ok(record) => loaded.records.push(record),
            Err(e) => {
                log::warn!("Rejecting row {}: {}", row, e);
                loaded.rejected.push(RowRejection {
                    row,
                    reason: e.to_string(),
                });
            }
        }
    }

    log::debug!(
        "Loaded {} line records ({} rejected)",
        loaded.records.len(),
        loaded.rejected.len()
    );
    Ok(loaded)
}

use std::io::{Cursor, Read};
use std::sync::Arc;

use csv::StringRecord;
use log::{debug, info};
use zip::ZipArchive;

use super::cache::DatasetCache;
use super::model::{Dataset, EntryTable, RawRecord};
use super::source::ArchiveSource;
use crate::error::{IngestError, Result};

/// Only entries ending with this suffix hold name data.
pub const DATA_FILE_SUFFIX: &str = ".txt";

/// Entry names look like `yob1880.txt`: a 3-character prefix, then the year.
pub const YEAR_OFFSET: usize = 3;
pub const YEAR_WIDTH: usize = 4;

const FIELDS_PER_RECORD: usize = 3;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Return the cached dataset, ingesting from `source` on the first call.
pub fn load_dataset(source: &dyn ArchiveSource, cache: &DatasetCache) -> Result<Arc<Dataset>> {
    cache.get_or_load(|| ingest(source))
}

/// Fetch and ingest without touching any cache.
pub fn ingest(source: &dyn ArchiveSource) -> Result<Dataset> {
    info!("Fetching names archive from {}", source.describe());
    let bytes = source.fetch()?;
    info!("Fetched {} bytes", bytes.len());
    ingest_archive(bytes)
}

/// Parse every data entry of a ZIP archive into one normalized dataset.
///
/// Any bad entry name or data line aborts the whole ingestion.
pub fn ingest_archive(bytes: Vec<u8>) -> Result<Dataset> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let mut tables = Vec::new();

    for idx in 0..archive.len() {
        let entry = archive.by_index(idx)?;
        let name = entry.name().to_string();

        if !name.ends_with(DATA_FILE_SUFFIX) {
            debug!("Skipping non-data entry {name}");
            continue;
        }

        let year = year_from_entry_name(&name)?;
        let records = parse_entry(entry, &name)?;
        debug!("Entry {name}: year {year}, {} rows", records.len());
        tables.push(EntryTable { year, records });
    }

    let dataset = Dataset::concat(tables);
    match dataset.year_span() {
        Some((first, last)) => info!(
            "Ingested {} rows in {} groups, years {first}-{last}",
            dataset.len(),
            dataset.groups().count()
        ),
        None => info!("Ingested an archive without any data rows"),
    }
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Entry name → year
// ---------------------------------------------------------------------------

/// Read the year from bytes `YEAR_OFFSET..YEAR_OFFSET + YEAR_WIDTH` of an entry
/// name, e.g. `yob1997.txt` → 1997.
pub fn year_from_entry_name(entry: &str) -> Result<i32> {
    let malformed = || IngestError::MalformedFilename {
        entry: entry.to_string(),
    };

    let digits = entry
        .as_bytes()
        .get(YEAR_OFFSET..YEAR_OFFSET + YEAR_WIDTH)
        .ok_or_else(malformed)?;
    if !digits.iter().all(u8::is_ascii_digit) {
        return Err(malformed());
    }

    Ok(digits
        .iter()
        .fold(0, |year, d| year * 10 + i32::from(d - b'0')))
}

// ---------------------------------------------------------------------------
// Entry content → records
// ---------------------------------------------------------------------------

/// Headerless `name,sex,count` lines, one record per line.
fn parse_entry<R: Read>(reader: R, entry: &str) -> Result<Vec<RawRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| csv_error(e, entry))?;
        records.push(decode_record(entry, &record)?);
    }
    Ok(records)
}

/// Decode one line into named fields, checking arity first so a shifted
/// column can never be silently misread.
pub fn decode_record(entry: &str, record: &StringRecord) -> Result<RawRecord> {
    let line = record.position().map_or(0, |p| p.line());
    let malformed = |reason: String| IngestError::MalformedRecord {
        entry: entry.to_string(),
        line,
        reason,
    };

    if record.len() != FIELDS_PER_RECORD {
        return Err(malformed(format!(
            "expected {FIELDS_PER_RECORD} fields, found {}",
            record.len()
        )));
    }

    let decoded: RawRecord = record
        .deserialize(None)
        .map_err(|e| malformed(deserialize_reason(&e)))?;
    if decoded.name.is_empty() {
        return Err(malformed("empty name".to_string()));
    }
    Ok(decoded)
}

fn deserialize_reason(err: &csv::Error) -> String {
    match err.kind() {
        csv::ErrorKind::Deserialize { err, .. } => err.to_string(),
        _ => err.to_string(),
    }
}

fn csv_error(err: csv::Error, entry: &str) -> IngestError {
    let line = err.position().map_or(0, |p| p.line());
    let reason = err.to_string();
    match err.into_kind() {
        // Decompression failures surface as I/O errors from the entry reader.
        csv::ErrorKind::Io(io) => IngestError::CorruptArchive { source: io.into() },
        _ => IngestError::MalformedRecord {
            entry: entry.to_string(),
            line,
            reason,
        },
    }
}

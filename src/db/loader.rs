use std::path::Path;

use csv::ReaderBuilder;

use crate::error::StoreError;
use crate::models::Record;

/// Immutable, id-ordered record collection.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<Record>,
}

impl RecordStore {
    pub fn from_records(mut records: Vec<Record>) -> Self {
        records.sort_by_key(|r| r.id);
        Self { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Load every listed file under `dir`. The record type is the file stem.
pub fn load_records(dir: &Path, files: &[String]) -> Result<RecordStore, StoreError> {
    if !dir.is_dir() {
        return Err(StoreError::DirectoryNotFound(dir.display().to_string()));
    }
    let mut records = Vec::new();
    for file in files {
        let path = dir.join(file);
        let loaded = load_file(&path)?;
        log::info!("Loaded {} records from {}", loaded.len(), path.display());
        records.extend(loaded);
    }
    if records.is_empty() {
        return Err(StoreError::Empty(dir.display().to_string()));
    }
    Ok(RecordStore::from_records(records))
}

/// Read one `id,name` file. Only the first comma separates the id; lines without a
/// usable positive id are skipped.
pub fn load_file(path: &Path) -> Result<Vec<Record>, StoreError> {
    let shown = path.display().to_string();
    let is_csv = path
        .extension()
        .map(|e| e.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);
    if !is_csv {
        return Err(StoreError::FileType(shown));
    }
    let record_type = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_path(path)
        .map_err(|e| csv_error(&shown, e))?;

    let mut out = Vec::new();
    let mut skipped = 0usize;
    for row in rdr.records() {
        let row = row.map_err(|e| csv_error(&shown, e))?;
        let fields: Vec<&str> = row.iter().collect();
        if fields.iter().all(|f| f.trim().is_empty()) {
            continue;
        }
        let id_field = fields[0];
        let name = if fields.len() > 1 {
            fields[1..].join(",")
        } else {
            id_field.to_string()
        };
        let digits: String = id_field.chars().filter(|c| c.is_ascii_digit()).collect();
        let id = digits.parse::<u64>().unwrap_or(0);
        match Record::new(id, name.trim(), record_type.as_str()) {
            Ok(r) => out.push(r),
            Err(_) => skipped += 1,
        }
    }
    if skipped > 0 {
        log::warn!("Skipped {} rows without a positive id in {}", skipped, shown);
    }
    Ok(out)
}

fn csv_error(path: &str, source: csv::Error) -> StoreError {
    StoreError::Csv {
        path: path.to_string(),
        source,
    }
}

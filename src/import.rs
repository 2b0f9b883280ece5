// 📥 CSV import - bulk-load animals into the store
//
// Expected header: type,breed,name,sterilized,arrived
// Every row is validated before it reaches the store; invalid rows are never written.

use crate::animal::{AnimalKind, AnimalRecord, UnknownKind};
use crate::error::Result;
use crate::store::AnimalStore;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    breed: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    sterilized: String,
    #[serde(default)]
    arrived: String,
}

/// One CSV row: a record, or the unrecognised type it carried
pub type ParsedRow = std::result::Result<AnimalRecord, UnknownKind>;

/// Outcome counts for one import run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub added: usize,
    /// Unknown type or failed `validate()`
    pub rejected: usize,
    /// Valid but the store refused it
    pub failed: usize,
}

/// yes/no, true/false, 1/0; blank means unanswered
fn parse_sterilized(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "yes" | "y" | "true" | "1" => Some(true),
        "no" | "n" | "false" | "0" => Some(false),
        _ => None,
    }
}

impl CsvRow {
    fn into_record(self) -> ParsedRow {
        let kind: AnimalKind = self.kind.parse()?;

        Ok(AnimalRecord::new(
            kind,
            self.breed,
            self.name,
            parse_sterilized(&self.sterilized),
            self.arrived,
        ))
    }
}

/// Parse CSV rows into records; rows with an unknown type come back as `Err`
pub fn read_records<R: Read>(reader: R) -> Result<Vec<ParsedRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for row in rdr.deserialize::<CsvRow>() {
        records.push(row?.into_record());
    }

    Ok(records)
}

pub fn load_csv(csv_path: &Path) -> Result<Vec<ParsedRow>> {
    let file = std::fs::File::open(csv_path)?;
    read_records(file)
}

/// Validate and add every row of the CSV file at `csv_path`
pub fn import_csv(store: &AnimalStore, csv_path: &Path) -> Result<ImportSummary> {
    let rows = load_csv(csv_path)?;
    let summary = import_records(store, rows);

    info!(
        path = %csv_path.display(),
        added = summary.added,
        rejected = summary.rejected,
        failed = summary.failed,
        "CSV import finished"
    );

    Ok(summary)
}

pub fn import_records(store: &AnimalStore, rows: Vec<ParsedRow>) -> ImportSummary {
    let mut summary = ImportSummary::default();

    for row in rows {
        match row {
            Ok(record) if record.validate() => {
                if store.add(&record) {
                    summary.added += 1;
                } else {
                    summary.failed += 1;
                }
            }
            Ok(record) => {
                warn!(record = %record, "Rejected invalid record");
                summary.rejected += 1;
            }
            Err(e) => {
                warn!(error = %e, "Rejected row");
                summary.rejected += 1;
            }
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = "\
type,breed,name,sterilized,arrived
Cat,Tuxedo,gCat,no,2025-09-24
dog,Akita,gDog,yes,2025-09-24
ferret,Sable,Bandit,yes,2025-01-01
cat,Calico,Patches,,2025-01-01
dog,Pug,Otis,true,2025-02-29
";

    #[test]
    fn test_read_records() {
        let rows = read_records(SAMPLE.as_bytes()).unwrap();
        assert_eq!(rows.len(), 5);

        let cat = rows[0].as_ref().unwrap();
        assert_eq!(cat.kind(), AnimalKind::Cat);
        assert_eq!(cat.sterilized(), Some(false));

        assert!(rows[2].is_err());

        let patches = rows[3].as_ref().unwrap();
        assert_eq!(patches.sterilized(), None);
        assert!(!patches.validate());
    }

    #[test]
    fn test_import_skips_invalid_rows() {
        let store = AnimalStore::open_in_memory().unwrap();
        let rows = read_records(SAMPLE.as_bytes()).unwrap();

        let summary = import_records(&store, rows);
        assert_eq!(
            summary,
            ImportSummary {
                added: 2,
                rejected: 3,
                failed: 0
            }
        );

        let names: Vec<String> = store
            .get_all()
            .unwrap()
            .iter()
            .map(|a| a.name().to_string())
            .collect();
        assert_eq!(names, vec!["gCat", "gDog"]);
    }

    #[test]
    fn test_import_csv_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let store = AnimalStore::open_in_memory().unwrap();
        let summary = import_csv(&store, file.path()).unwrap();

        assert_eq!(summary.added, 2);
        assert_eq!(store.count().unwrap(), 2);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let store = AnimalStore::open_in_memory().unwrap();
        assert!(import_csv(&store, Path::new("/definitely/not/here.csv")).is_err());
    }

    #[test]
    fn test_parse_sterilized() {
        assert_eq!(parse_sterilized("Yes"), Some(true));
        assert_eq!(parse_sterilized(" 0 "), Some(false));
        assert_eq!(parse_sterilized(""), None);
        assert_eq!(parse_sterilized("maybe"), None);
    }
}

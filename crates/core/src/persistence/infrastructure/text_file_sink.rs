use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::persistence::domain::persisted_record::PersistedRecord;
use crate::persistence::domain::persistence_sink::{PersistenceError, PersistenceSink};
use crate::shared::constants::{STORE_FILE_EXTENSION, STORE_FILE_PREFIX};

/// Appends records to one text file per subject: `<dir>/Faceof<name>.txt`.
pub struct TextFileSink {
    dir: PathBuf,
}

impl TextFileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, name: &str) -> Result<PathBuf, PersistenceError> {
        validate_name(name)?;
        Ok(self
            .dir
            .join(format!("{STORE_FILE_PREFIX}{name}.{STORE_FILE_EXTENSION}")))
    }
}

impl PersistenceSink for TextFileSink {
    fn append(&mut self, record: &PersistedRecord) -> Result<(), PersistenceError> {
        let path = self.path_for(&record.name)?;
        let io_err = |source| PersistenceError::Io {
            path: path.clone(),
            source,
        };

        // Ensure the store directory exists (infrastructure concern)
        fs::create_dir_all(&self.dir).map_err(io_err)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(io_err)?;
        file.write_all(record.to_string().as_bytes())
            .map_err(io_err)?;

        log::info!("Saved record for '{}' to {}", record.name, path.display());
        Ok(())
    }
}

fn validate_name(name: &str) -> Result<(), PersistenceError> {
    // Store lines are trimmed on read, so padding would not survive a round trip.
    let invalid = name.trim().is_empty()
        || name.trim() != name
        || name.contains(['/', '\\', '\n', '\r'])
        || name.contains("..");
    if invalid {
        return Err(PersistenceError::InvalidName(name.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::domain::metric_table::METRIC_COUNT;
    use rstest::rstest;

    fn record(name: &str, value: f64) -> PersistedRecord {
        PersistedRecord {
            name: name.to_string(),
            values: [value; METRIC_COUNT],
        }
    }

    #[test]
    fn test_append_creates_subject_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = TextFileSink::new(dir.path().join("store"));
        sink.append(&record("Alice", 1.5)).unwrap();

        let path = dir.path().join("store").join("FaceofAlice.txt");
        let text = fs::read_to_string(path).unwrap();
        assert!(text.starts_with("Name:Alice\n1.5,1.5"));
    }

    #[test]
    fn test_append_accumulates_records() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = TextFileSink::new(dir.path());
        sink.append(&record("Bob", 1.0)).unwrap();
        sink.append(&record("Bob", 2.0)).unwrap();

        let text = fs::read_to_string(sink.path_for("Bob").unwrap()).unwrap();
        let records = PersistedRecord::parse_all(&text).unwrap();
        assert_eq!(records, vec![record("Bob", 1.0), record("Bob", 2.0)]);
    }

    #[test]
    fn test_subjects_get_separate_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = TextFileSink::new(dir.path());
        sink.append(&record("Alice", 1.0)).unwrap();
        sink.append(&record("Bob", 2.0)).unwrap();
        assert!(dir.path().join("FaceofAlice.txt").exists());
        assert!(dir.path().join("FaceofBob.txt").exists());
    }

    #[rstest]
    #[case::empty("")]
    #[case::blank("   ")]
    #[case::slash("a/b")]
    #[case::backslash("a\\b")]
    #[case::parent("..")]
    #[case::newline("Al\nice")]
    #[case::trailing_space("Alice ")]
    #[case::leading_space(" Alice")]
    #[case::trailing_tab("Alice\t")]
    fn test_invalid_names_rejected(#[case] name: &str) {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = TextFileSink::new(dir.path());
        let err = sink.append(&record(name, 1.0)).unwrap_err();
        assert!(matches!(err, PersistenceError::InvalidName(_)));
    }

    #[rstest]
    #[case::plain("Alice")]
    #[case::inner_space("Mary Ann")]
    #[case::dotted("J.R.")]
    fn test_saved_name_reads_back_unchanged(#[case] name: &str) {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = TextFileSink::new(dir.path());
        sink.append(&record(name, 1.0)).unwrap();

        let text = fs::read_to_string(sink.path_for(name).unwrap()).unwrap();
        let records = PersistedRecord::parse_all(&text).unwrap();
        assert_eq!(records, vec![record(name, 1.0)]);
    }

    #[test]
    fn test_unwritable_dir_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let mut sink = TextFileSink::new(&blocker);
        let err = sink.append(&record("Alice", 1.0)).unwrap_err();
        assert!(matches!(err, PersistenceError::Io { .. }));
    }
}

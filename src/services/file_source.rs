use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::data::record::RecordSet;
use crate::error::FetchError;
use crate::services::FetchService;

/// Fetch service backed by a JSON array on disk
///
/// The search key is ignored; filtering happens locally in the controller.
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FetchService for JsonFileSource {
    fn fetch(&self, _query: &str) -> Result<RecordSet, FetchError> {
        let start = std::time::Instant::now();
        let contents = fs::read_to_string(&self.path)?;
        let records: RecordSet = serde_json::from_str(&contents)?;
        info!(
            target: "file_source",
            "Loaded {} records from {} in {:?}",
            records.len(),
            self.path.display(),
            start.elapsed()
        );
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_loads_records_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"oppId":"1","name":"Acme"}},{{"id":"2","name":"Globex","amount":10}}]"#
        )
        .unwrap();

        let records = JsonFileSource::new(file.path()).fetch("ignored").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].name, "Globex");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let source = JsonFileSource::new("/definitely/not/here.json");
        assert!(matches!(source.fetch(""), Err(FetchError::Io(_))));
    }

    #[test]
    fn test_malformed_file_is_decode_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        let source = JsonFileSource::new(file.path());
        assert!(matches!(source.fetch(""), Err(FetchError::Decode(_))));
    }
}

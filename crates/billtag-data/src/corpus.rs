//! Corpus loading: a split is one JSON file holding an array of bill records.

use std::fs;
use std::path::Path;

use billtag_core::BillRecord;
use serde_json::Value;
use tracing::info;

use crate::DataError;

/// Load a split from a JSON file containing a top-level array of records.
///
/// Record order is preserved. No schema validation happens beyond requiring
/// an array of objects — individual records may carry any fields at all.
pub fn load_corpus(path: &Path) -> Result<Vec<BillRecord>, DataError> {
    let raw = fs::read_to_string(path).map_err(|e| DataError::io(path, e))?;

    let value: Value = serde_json::from_str(&raw).map_err(|e| DataError::Parse {
        path: path.to_path_buf(),
        source: e,
    })?;

    if !value.is_array() {
        return Err(DataError::NotAnArray(path.to_path_buf()));
    }

    let bills: Vec<BillRecord> =
        serde_json::from_value(value).map_err(|e| DataError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;

    info!(count = bills.len(), path = %path.display(), "loaded corpus");
    Ok(bills)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_corpus(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bills.json");
        let mut f = fs::File::create(&path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        (dir, path)
    }

    #[test]
    fn loads_array_of_records() {
        let (_dir, path) = write_corpus(
            r#"[{"title": "Act A", "subjects": ["Health"]}, {"title": "Act B"}]"#,
        );
        let bills = load_corpus(&path).unwrap();
        assert_eq!(bills.len(), 2);
        assert_eq!(bills[0].0["title"], "Act A");
    }

    #[test]
    fn empty_array_is_valid() {
        let (_dir, path) = write_corpus("[]");
        assert!(load_corpus(&path).unwrap().is_empty());
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_corpus(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, DataError::Io { .. }));
    }

    #[test]
    fn invalid_json_is_parse_error() {
        let (_dir, path) = write_corpus("[{not json");
        let err = load_corpus(&path).unwrap_err();
        assert!(matches!(err, DataError::Parse { .. }));
    }

    #[test]
    fn top_level_object_rejected() {
        let (_dir, path) = write_corpus(r#"{"bills": []}"#);
        let err = load_corpus(&path).unwrap_err();
        assert!(matches!(err, DataError::NotAnArray(_)));
    }

    #[test]
    fn non_object_element_is_parse_error() {
        let (_dir, path) = write_corpus(r#"[1, 2, 3]"#);
        let err = load_corpus(&path).unwrap_err();
        assert!(matches!(err, DataError::Parse { .. }));
    }
}

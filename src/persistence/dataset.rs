//! Labeled dataset files (JSON array of samples).

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::Result;
use crate::persistence::serialization;
use crate::sample::Sample;

/// Read a dataset written by [`save_dataset`]. Each sample is re-validated.
pub fn load_dataset(path: impl AsRef<Path>) -> Result<Vec<Sample>> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    let samples: Vec<Sample> = serialization::from_json(&bytes)?;
    info!(path = %path.display(), len = samples.len(), "loaded dataset");
    Ok(samples)
}

/// Write samples as a JSON array.
pub fn save_dataset(path: impl AsRef<Path>, samples: &[Sample]) -> Result<()> {
    let bytes = serialization::to_json(&samples)?;
    fs::write(path, bytes)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SearchError;
    use tempfile::TempDir;

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("train.json");
        let samples = vec![
            Sample::new(vec![0, 1, 2, 3], 2, 2).unwrap().with_label('0'),
            Sample::new(vec![9, 9, 9, 9], 2, 2).unwrap(),
        ];

        save_dataset(&path, &samples).unwrap();
        let loaded = load_dataset(&path).unwrap();
        assert_eq!(loaded, samples);
    }

    #[test]
    fn test_invalid_sample_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, r#"[{"ncols": 3, "nrows": 3, "pixels": [1, 2]}]"#).unwrap();
        assert!(matches!(
            load_dataset(&path),
            Err(SearchError::SerializationError(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            load_dataset(dir.path().join("nope.json")),
            Err(SearchError::IoError(_))
        ));
    }
}

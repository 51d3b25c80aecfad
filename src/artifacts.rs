//! Reading the pre-trained artifacts from disk.

use std::fmt::Debug;
use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::model::Model;
use crate::opts::ArtifactOpts;
use crate::prelude::*;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Format {
    Json,
    Pickle,
}

impl Format {
    pub fn from_path(path: &Path) -> Self {
        match path.extension() {
            Some(extension) if extension.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Pickle,
        }
    }

    pub fn decode<T: DeserializeOwned>(self, bytes: &[u8]) -> Result<T> {
        let value = match self {
            Self::Json => serde_json::from_slice(bytes)?,
            Self::Pickle => serde_pickle::from_slice(bytes, Default::default())?,
        };
        Ok(value)
    }
}

#[instrument(level = "info", skip_all, fields(path = ?path))]
pub fn read<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let format = Format::from_path(path);
    let bytes = fs::read(path).with_context(|| format!("failed to read `{}`", path.display()))?;
    debug!(n_bytes = bytes.len(), ?format);
    format
        .decode(&bytes)
        .with_context(|| format!("failed to decode `{}` as {:?}", path.display(), format))
}

/// Raw artifacts as they are stored: the model and its ordered feature column names.
pub struct Artifacts {
    pub model: Model,
    pub columns: Vec<String>,
}

impl Artifacts {
    pub fn read(opts: &ArtifactOpts) -> Result<Self> {
        let start_instant = Instant::now();
        let model: Model = read(&opts.model_path)?;
        let columns: Vec<String> = read(&opts.columns_path)?;
        info!(
            model_path = ?opts.model_path,
            columns_path = ?opts.columns_path,
            n_columns = columns.len(),
            elapsed = %crate::tracing::format_elapsed(start_instant),
            "loaded",
        );
        Ok(Self { model, columns })
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::input::InputRecord;
    use crate::predictor::{Outcome, Predictor, UnseenStationPolicy};

    #[test]
    fn format_from_path_ok() {
        assert_eq!(Format::from_path(Path::new("model_columns.json")), Format::Json);
        assert_eq!(Format::from_path(Path::new("MODEL.JSON")), Format::Json);
        assert_eq!(Format::from_path(Path::new("model_columns.pkl")), Format::Pickle);
        assert_eq!(Format::from_path(Path::new("model")), Format::Pickle);
    }

    #[test]
    fn decode_pickled_columns_ok() -> Result {
        let columns = vec!["year".to_string(), "id_1".to_string()];
        let bytes = serde_pickle::to_vec(&columns, Default::default())?;
        assert_eq!(Format::Pickle.decode::<Vec<String>>(&bytes)?, columns);
        Ok(())
    }

    /// `pickle.dumps(["year", "id_1"], protocol=4)`
    #[test]
    fn decode_python_pickle_ok() -> Result {
        let bytes = b"\x80\x04\x95\x13\x00\x00\x00\x00\x00\x00\x00]\x94(\x8c\x04year\x94\x8c\x04id_1\x94e.";
        assert_eq!(Format::Pickle.decode::<Vec<String>>(bytes)?, ["year", "id_1"]);
        Ok(())
    }

    #[test]
    fn decode_corrupt_error() {
        assert!(Format::Pickle.decode::<Vec<String>>(b"not a pickle").is_err());
        assert!(Format::Json.decode::<Vec<String>>(b"[1, 2").is_err());
    }

    #[test]
    fn read_missing_file_error() {
        let opts = ArtifactOpts {
            model_path: PathBuf::from("/nonexistent/pollution_model.pkl"),
            columns_path: PathBuf::from("/nonexistent/model_columns.pkl"),
        };
        assert!(Artifacts::read(&opts).is_err());
    }

    #[test]
    fn read_bundled_demo_ok() -> Result {
        let opts = ArtifactOpts {
            model_path: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/demo/pollution_model.json")),
            columns_path: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/demo/model_columns.json")),
        };
        let predictor = Predictor::new(Artifacts::read(&opts)?, UnseenStationPolicy::Reject)?;
        assert_eq!(predictor.layout().n_stations(), 22);
        let outcome = predictor.predict(&InputRecord::new(2022, "1")?)?;
        assert!(matches!(outcome, Outcome::Predicted { warning: None, .. }));
        Ok(())
    }
}

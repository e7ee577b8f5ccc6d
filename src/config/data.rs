//! Knowledge base file locations

use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::error::ValidationError;

/// Directory used when neither `dir` nor a file path is configured
pub const DEFAULT_DATA_DIR: &str = "data";

const QUESTIONS_FILE_NAME: &str = "questions.json";
const CANDIDATES_FILE_NAME: &str = "diseases.json";
const MODEL_FILE_NAME: &str = "diagnosis_model.json";

/// Locations of the knowledge base files
///
/// A file path set explicitly wins over `dir`. Files left unset are looked
/// up by their default name inside `dir`, or inside `data/` when `dir` is
/// unset too.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DataConfig {
    /// Directory holding all three files under their default names
    #[serde(default)]
    pub dir: Option<PathBuf>,

    /// Question catalog (JSON or YAML)
    #[serde(default)]
    pub questions_file: Option<PathBuf>,

    /// Ordered candidate list (JSON or YAML)
    #[serde(default)]
    pub candidates_file: Option<PathBuf>,

    /// Weight model (JSON or YAML)
    #[serde(default)]
    pub model_file: Option<PathBuf>,
}

impl DataConfig {
    /// The data directory, when every file lives in it under its default name
    pub fn directory_only(&self) -> Option<&Path> {
        if self.questions_file.is_some() || self.candidates_file.is_some() || self.model_file.is_some() {
            return None;
        }
        self.dir.as_deref()
    }

    pub fn questions_path(&self) -> PathBuf {
        self.resolve(self.questions_file.as_ref(), QUESTIONS_FILE_NAME)
    }

    pub fn candidates_path(&self) -> PathBuf {
        self.resolve(self.candidates_file.as_ref(), CANDIDATES_FILE_NAME)
    }

    pub fn model_path(&self) -> PathBuf {
        self.resolve(self.model_file.as_ref(), MODEL_FILE_NAME)
    }

    fn resolve(&self, explicit: Option<&PathBuf>, file_name: &str) -> PathBuf {
        match (explicit, &self.dir) {
            (Some(path), _) => path.clone(),
            (None, Some(dir)) => dir.join(file_name),
            (None, None) => Path::new(DEFAULT_DATA_DIR).join(file_name),
        }
    }

    /// Validate data configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let fields = [
            ("data.dir", &self.dir),
            ("data.questions_file", &self.questions_file),
            ("data.candidates_file", &self.candidates_file),
            ("data.model_file", &self.model_file),
        ];
        for (name, value) in fields {
            if value.as_ref().is_some_and(|path| path.as_os_str().is_empty()) {
                return Err(ValidationError::MissingRequired(name));
            }
        }
        Ok(())
    }
}

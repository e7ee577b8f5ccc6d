//! File-based Knowledge Base Adapter
//!
//! Reads the candidate list, question catalog and weight model from JSON or
//! YAML files on disk. The format is chosen by file extension.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::catalog::QuestionCatalog;
use crate::domain::inference::WeightModel;
use crate::ports::{KnowledgeBase, KnowledgeBaseError};

/// Default file name of the question catalog
pub const QUESTIONS_FILE: &str = "questions.json";

/// Default file name of the candidate list
pub const CANDIDATES_FILE: &str = "diseases.json";

/// Default file name of the weight model
pub const MODEL_FILE: &str = "diagnosis_model.json";

/// Serialization format of a knowledge base file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileFormat {
    Json,
    Yaml,
}

impl FileFormat {
    fn from_path(path: &Path) -> Result<Self, KnowledgeBaseError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(FileFormat::Json),
            Some("yaml") | Some("yml") => Ok(FileFormat::Yaml),
            _ => Err(KnowledgeBaseError::UnsupportedFormat(
                path.display().to_string(),
            )),
        }
    }
}

/// File-based knowledge base
#[derive(Debug, Clone)]
pub struct FileKnowledgeBase {
    questions_path: PathBuf,
    candidates_path: PathBuf,
    model_path: PathBuf,
}

impl FileKnowledgeBase {
    /// Create a knowledge base from explicit file paths
    pub fn new<P: AsRef<Path>>(questions_path: P, candidates_path: P, model_path: P) -> Self {
        Self {
            questions_path: questions_path.as_ref().to_path_buf(),
            candidates_path: candidates_path.as_ref().to_path_buf(),
            model_path: model_path.as_ref().to_path_buf(),
        }
    }

    /// Create a knowledge base using the default file names inside `dir`
    ///
    /// # Example
    /// ```ignore
    /// let kb = FileKnowledgeBase::from_dir("./data");
    /// ```
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        Self {
            questions_path: dir.join(QUESTIONS_FILE),
            candidates_path: dir.join(CANDIDATES_FILE),
            model_path: dir.join(MODEL_FILE),
        }
    }

    /// Read and deserialize one file
    async fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T, KnowledgeBaseError> {
        let format = FileFormat::from_path(path)?;

        if !path.exists() {
            return Err(KnowledgeBaseError::NotFound(path.display().to_string()));
        }

        let text = fs::read_to_string(path)
            .await
            .map_err(|e| KnowledgeBaseError::IoError(e.to_string()))?;

        let parsed = match format {
            FileFormat::Json => serde_json::from_str(&text).map_err(|e| e.to_string()),
            FileFormat::Yaml => serde_yaml::from_str(&text).map_err(|e| e.to_string()),
        };

        parsed.map_err(|reason| KnowledgeBaseError::ParseFailed {
            path: path.display().to_string(),
            reason,
        })
    }
}

#[async_trait]
impl KnowledgeBase for FileKnowledgeBase {
    async fn load_questions(&self) -> Result<QuestionCatalog, KnowledgeBaseError> {
        let catalog: QuestionCatalog = Self::read_document(&self.questions_path).await?;
        catalog
            .validate()
            .map_err(|e| KnowledgeBaseError::Invalid(e.to_string()))?;
        tracing::debug!(path = %self.questions_path.display(), questions = catalog.len(), "loaded questions");
        Ok(catalog)
    }

    async fn load_candidates(&self) -> Result<Vec<String>, KnowledgeBaseError> {
        let candidates: Vec<String> = Self::read_document(&self.candidates_path).await?;
        tracing::debug!(path = %self.candidates_path.display(), candidates = candidates.len(), "loaded candidates");
        Ok(candidates)
    }

    async fn load_model(&self) -> Result<WeightModel, KnowledgeBaseError> {
        let model = Self::read_document(&self.model_path).await?;
        tracing::debug!(path = %self.model_path.display(), "loaded weight model");
        Ok(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::inference::Weight;
    use tempfile::TempDir;

    async fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).await.unwrap();
        path
    }

    async fn json_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            QUESTIONS_FILE,
            r#"[{"id": "red_eye", "text": "Is the eye red?", "type": "yesno"}]"#,
        )
        .await;
        write(&dir, CANDIDATES_FILE, r#"["Conjunctivitis", "Glaucoma"]"#).await;
        write(
            &dir,
            MODEL_FILE,
            r#"{"Conjunctivitis": {"red_eye": {"Yes": 3, "No": -1}},
                "Glaucoma": {"red_eye": {"Yes": 1, "No": 0}}}"#,
        )
        .await;
        dir
    }

    #[tokio::test]
    async fn test_load_from_json_dir() {
        let dir = json_dir().await;
        let kb = FileKnowledgeBase::from_dir(dir.path());

        let catalog = kb.load_questions().await.unwrap();
        assert_eq!(catalog.ids(), vec!["red_eye"]);

        let candidates = kb.load_candidates().await.unwrap();
        assert_eq!(candidates, vec!["Conjunctivitis", "Glaucoma"]);

        let model = kb.load_model().await.unwrap();
        assert_eq!(model.weight("Conjunctivitis", "red_eye", "No"), Weight::Eliminate);
        assert_eq!(model.weight("Glaucoma", "red_eye", "Yes"), Weight::Evidence(1.0));
    }

    #[tokio::test]
    async fn test_load_model_from_yaml() {
        let dir = TempDir::new().unwrap();
        let questions = write(&dir, "questions.yaml", "- id: pain\n  text: Painful?\n  type: yesno\n").await;
        let candidates = write(&dir, "diseases.yml", "- Uveitis\n").await;
        let model = write(&dir, "model.yaml", "Uveitis:\n  pain:\n    Yes: 2\n    No: -1\n").await;

        let kb = FileKnowledgeBase::new(questions, candidates, model);
        let model = kb.load_model().await.unwrap();
        assert_eq!(model.weight("Uveitis", "pain", "No"), Weight::Eliminate);
        assert_eq!(kb.load_candidates().await.unwrap(), vec!["Uveitis"]);
        assert_eq!(kb.load_questions().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let kb = FileKnowledgeBase::from_dir(dir.path());

        let result = kb.load_model().await;
        assert!(matches!(result, Err(KnowledgeBaseError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_unknown_extension_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "diseases.txt", "Glaucoma").await;
        let kb = FileKnowledgeBase::new(path.clone(), path.clone(), path);

        let result = kb.load_candidates().await;
        assert!(matches!(result, Err(KnowledgeBaseError::UnsupportedFormat(_))));
    }

    #[tokio::test]
    async fn test_malformed_json_is_parse_error() {
        let dir = TempDir::new().unwrap();
        write(&dir, CANDIDATES_FILE, r#"["Glaucoma""#).await;
        let kb = FileKnowledgeBase::from_dir(dir.path());

        let result = kb.load_candidates().await;
        assert!(matches!(result, Err(KnowledgeBaseError::ParseFailed { .. })));
    }

    #[tokio::test]
    async fn test_invalid_catalog_is_rejected() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            QUESTIONS_FILE,
            r#"[{"id": "q1", "text": "A?", "type": "yesno"},
                {"id": "q1", "text": "B?", "type": "yesno"}]"#,
        )
        .await;
        let kb = FileKnowledgeBase::from_dir(dir.path());

        let result = kb.load_questions().await;
        assert!(matches!(result, Err(KnowledgeBaseError::Invalid(_))));
    }
}

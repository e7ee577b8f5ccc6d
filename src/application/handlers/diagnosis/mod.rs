//! Diagnosis handlers.

mod start_diagnosis;

pub use start_diagnosis::{StartDiagnosisHandler, StartDiagnosisResult};

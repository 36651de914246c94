use rust_bert::RustBertError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AbsaError {
    #[error("Translation error: {0}")]
    TranslationError(String),

    #[error("Aspect extraction error: {0}")]
    ExtractionError(String),

    #[error("Sentiment classification error: {0}")]
    ClassificationError(String),

    #[error("Model loading error: {0}")]
    ModelLoadError(String),

    #[error("IO error: {0}")]
    IOError(String),

    #[error("Invalid configuration error: {0}")]
    InvalidConfigurationError(String),

    #[error("Pipeline runner error: {0}")]
    RunnerError(String),

    #[error("Model failure: {0}")]
    ModelPanic(String),
}

impl From<RustBertError> for AbsaError {
    fn from(error: RustBertError) -> Self {
        AbsaError::ModelLoadError(error.to_string())
    }
}

impl From<std::io::Error> for AbsaError {
    fn from(error: std::io::Error) -> Self {
        AbsaError::IOError(error.to_string())
    }
}

impl From<serde_json::Error> for AbsaError {
    fn from(error: serde_json::Error) -> Self {
        AbsaError::InvalidConfigurationError(error.to_string())
    }
}

impl From<csv::Error> for AbsaError {
    fn from(error: csv::Error) -> Self {
        AbsaError::InvalidConfigurationError(error.to_string())
    }
}

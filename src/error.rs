use std::path::PathBuf;

use thiserror::Error;

/// Startup failures. Any of these leaves the process unable to serve.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("prediction artifact not found at {0}")]
    Missing(PathBuf),

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse artifact metadata {path}: {source}")]
    Meta {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("artifact feature list does not match the vehicle record: expected {expected:?}, got {got:?}")]
    FeatureMismatch {
        expected: Vec<String>,
        got: Vec<String>,
    },

    #[error("failed to load TorchScript {path}: {message}")]
    Torch { path: PathBuf, message: String },

    #[error("warm-up prediction failed: {0}")]
    WarmUp(#[source] PredictError),
}

/// Failure of a single call into the prediction pipeline.
#[derive(Debug, Error)]
pub enum PredictError {
    #[error("pipeline raised: {0}")]
    Backend(String),

    #[error("pipeline returned an empty output")]
    EmptyOutput,

    #[error("pipeline returned an unsupported output type")]
    UnexpectedOutput,

    #[error("feature row has no numeric column {0}")]
    MissingColumn(&'static str),

    #[error(transparent)]
    Field(#[from] FieldError),
}

/// A form value the input surface refuses to accept.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldError {
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfBounds {
        field: &'static str,
        min: String,
        max: String,
        value: String,
    },

    #[error("{field} is not a valid number: {value:?}")]
    NotANumber { field: &'static str, value: String },

    #[error("{field} must be one of {allowed}, got {value:?}")]
    UnknownChoice {
        field: &'static str,
        allowed: String,
        value: String,
    },
}

/// The page template failed to compile or render.
#[derive(Debug, Error)]
#[error("page template error: {0}")]
pub struct RenderError(#[from] pub minijinja::Error);

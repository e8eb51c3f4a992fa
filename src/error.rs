use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid regex pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("Invalid duration '{0}'. Expected format like 1y2mo3w4d5h6m7s")]
    InvalidDuration(String),

    #[error("Invalid sort criteria '{0}'. Allowed values: [version, alphabetic]")]
    InvalidSortCriteria(String),

    #[error("No label selector given for {kind}. Use --label \"key=value\"")]
    MissingLabelSelector { kind: String },

    #[error("Incorrect label format, expected \"key=value\": {0}")]
    InvalidLabel(String),

    #[error("Missing or invalid image name: {0}")]
    InvalidImageName(String),

    #[error("Image stream '{name}' not found in namespace '{namespace}'")]
    ImageStreamNotFound { namespace: String, name: String },

    #[error("Kubernetes API error: {0}")]
    Kube(#[from] kube::Error),

    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

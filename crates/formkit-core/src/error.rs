use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormError {
    #[error("no open step for {operation}: call add_step() first")]
    NoOpenStep { operation: String },

    #[error("form '{0}' must have at least one step")]
    EmptyForm(String),

    #[error("duplicate step id '{step}' in form '{form}'")]
    DuplicateStep { form: String, step: String },

    #[error("duplicate field id '{field}' in step '{step}'")]
    DuplicateField { step: String, field: String },

    #[error("page template has no <div id=\"app\"> anchor")]
    MissingAppAnchor,

    #[error("unsupported definition format '{0}': expected .yaml, .yml or .json")]
    UnsupportedFormat(String),

    #[error("unknown demo form: {0}")]
    DemoNotFound(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FormError>;

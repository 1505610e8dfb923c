use thiserror::Error;

#[derive(Error, Debug)]
pub enum FolioError {
    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Missing column: {0}")]
    MissingColumn(&'static str),

    #[error("Invalid {field} value: {value:?}")]
    InvalidField { field: &'static str, value: String },

    #[error("Invalid heading level: {0:?}")]
    InvalidHeading(String),

    #[error("No pie slice at index {0}")]
    UnknownSlice(usize),
}

impl FolioError {
    pub(crate) fn invalid(field: &'static str, value: &str) -> Self {
        FolioError::InvalidField {
            field,
            value: value.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FolioError>;

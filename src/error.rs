use thiserror::Error;

#[derive(Error, Debug)]
pub enum PnlError {
    #[error("Required column '{column}' not found in input table")]
    MissingColumn { column: String },

    #[error("No historical years configured")]
    EmptyYearList,

    #[error("Category '{0}' is listed as both revenue and expense")]
    OverlappingClassification(String),

    #[error("Invalid configuration: {details}")]
    InvalidConfig { details: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PnlError>;

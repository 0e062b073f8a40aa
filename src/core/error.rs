use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SweeperError {
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),
    #[error("Error processing {file}: {message}")]
    ParseError { file: String, message: String },
    #[error("Cannot fill column '{column}' using {method}: column is not numeric")]
    InvalidFillTarget { column: String, method: String },
    #[error("Unknown column: {0}")]
    UnknownColumn(String),
    #[error("Encoding error: {0}")]
    EncodingError(String),
    #[error("File not found in session: {0}")]
    EntryNotFound(String),
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Cannot parse config: {0}")]
    ConfigParsingError(String),
    #[error("IO error: {0}")]
    IoError(String),
}

impl SweeperError {
    pub fn parse(file: &str, message: impl ToString) -> Self {
        SweeperError::ParseError {
            file: file.to_string(),
            message: message.to_string(),
        }
    }
}

impl From<std::io::Error> for SweeperError {
    fn from(err: std::io::Error) -> Self {
        SweeperError::IoError(err.to_string())
    }
}

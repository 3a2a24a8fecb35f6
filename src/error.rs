//! Error types for the collaborator-facing helpers
//!
//! Geometry math and the pagination loop never fail; these errors only come
//! from parsing configuration and from mutating the text buffer.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PageflowError {
    #[error("Unknown paper size '{0}'.")]
    UnknownPaper(String),
    #[error("Unknown measurement unit '{0}'.")]
    UnknownUnit(String),
    #[error("Invalid page geometry configuration: {0}")]
    InvalidConfig(#[from] serde_json::Error),
    #[error("Offset {offset} is out of bounds for text of length {len}.")]
    OffsetOutOfBounds { offset: usize, len: usize },
    #[error("Invalid text range {start}..{end} for text of length {len}.")]
    InvalidRange { start: usize, end: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, PageflowError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = PageflowError::OffsetOutOfBounds { offset: 12, len: 10 };
        assert_eq!(
            err.to_string(),
            "Offset 12 is out of bounds for text of length 10."
        );

        let err = PageflowError::UnknownPaper("folio".to_string());
        assert_eq!(err.to_string(), "Unknown paper size 'folio'.");
    }

    #[test]
    fn test_json_error_converts() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: PageflowError = json_err.into();
        assert!(matches!(err, PageflowError::InvalidConfig(_)));
    }
}

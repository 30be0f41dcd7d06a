use axum::http::StatusCode;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

/// Domain errors raised by the tracker.
///
/// An unmatched food query is not an error: matching returns `Option`.
#[derive(Debug, Error)]
pub enum AppError {
    /// Upload could not be decoded as an image.
    #[error("image decode failed: {0}")]
    ImageDecode(#[from] image::ImageError),

    /// A user-submitted field was malformed or outside its enumeration.
    #[error("invalid value for {field}: {value:?}")]
    InvalidInput { field: &'static str, value: String },

    /// Reference table is unusable (missing `food` column, unreadable file).
    #[error("reference table: {0}")]
    Table(String),

    #[error("csv: {0}")]
    Csv(#[from] csv::Error),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    /// Upload storage or background task failure.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn invalid(field: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            value: value.into(),
        }
    }

    /// Maps the error onto the `(StatusCode, String)` rejection handlers return.
    pub fn into_rejection(self) -> (StatusCode, String) {
        match self {
            AppError::ImageDecode(e) => {
                tracing::warn!(error = %e, "image processing failed");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "Image processing failed".into(),
                )
            }
            AppError::InvalidInput { field, value } => (
                StatusCode::BAD_REQUEST,
                format!("Invalid {field}: {value:?}"),
            ),
            other => {
                tracing::error!(error = %other, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, other.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_input_maps_to_bad_request() {
        let (status, msg) = AppError::invalid("grams", "abc").into_rejection();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(msg.contains("grams"));
        assert!(msg.contains("abc"));
    }

    #[test]
    fn decode_error_hides_details() {
        let err = image::load_from_memory(b"definitely not an image").unwrap_err();
        let (status, msg) = AppError::from(err).into_rejection();
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(msg, "Image processing failed");
    }

    #[test]
    fn io_error_is_internal() {
        let err = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let (status, _) = AppError::from(err).into_rejection();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}

use thiserror::Error;

/// Main error type for Cartograph
#[derive(Error, Debug)]
pub enum CartographError {
    /// File system I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// No entities survived normalization, so no snapshot may be written
    #[error("no entities found under {0}; refusing to overwrite existing snapshots")]
    EmptyGraph(String),
}

/// Convenient Result type using CartographError
pub type Result<T> = std::result::Result<T, CartographError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CartographError::EmptyGraph("data_yml".to_string());
        assert!(err.to_string().contains("no entities found"));
        assert!(err.to_string().contains("data_yml"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let carto_err: CartographError = io_err.into();
        assert!(matches!(carto_err, CartographError::Io(_)));
    }

    #[test]
    fn test_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let carto_err: CartographError = json_err.into();
        assert!(matches!(carto_err, CartographError::Json(_)));
    }
}

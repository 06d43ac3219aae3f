//! Converter error types

use pxvw_css::CssError;
use thiserror::Error;

/// Configuration result type
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while building a [`Config`](crate::Config)
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid viewport width {0}: must be a positive number")]
    InvalidViewportWidth(f64),

    #[error("Invalid unit precision {0}: at most 20 fractional digits")]
    InvalidUnitPrecision(u32),

    #[error("Invalid minimum pixel value {0}")]
    InvalidMinPixelValue(f64),

    #[error("Invalid selector pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },

    #[error("Invalid options: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while converting a whole stylesheet
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("CSS error: {0}")]
    Css(#[from] CssError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ConfigError::InvalidViewportWidth(0.0);
        assert_eq!(err.to_string(), "Invalid viewport width 0: must be a positive number");
    }

    #[test]
    fn test_unit_precision_display() {
        let err = ConfigError::InvalidUnitPrecision(400);
        assert_eq!(err.to_string(), "Invalid unit precision 400: at most 20 fractional digits");
    }

    #[test]
    fn test_css_error_wraps() {
        let css = CssError::unexpected_char('}', pxvw_css::SourceLocation::new(2, 1, 10));
        let err = ProcessError::from(css);
        assert_eq!(err.to_string(), "CSS error: Unexpected character '}' at 2:1");
    }
}

// ABOUTME: Custom error types for the image search SDK with user-friendly messages
// ABOUTME: Separates local validation failures, service rejections and transport failures

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("No image file selected")]
    NoFileSelected,

    #[error("An image URL is required")]
    MissingUrl,

    #[error("Invalid image URL '{0}'")]
    InvalidUrl(String),

    #[error("An image id is required to remove an image")]
    MissingImageId,

    #[error("Could not read image file: {0}")]
    FileRead(String),

    #[error("request rejected [{status}][{message}]")]
    Application { status: String, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Timeout: Request took too long to complete")]
    Timeout,

    #[error("Invalid service response: {0}")]
    InvalidResponse(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// The three failure classes an action can end in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Detected locally, the gateway was never contacted
    Validation,
    /// The service answered with a non-success status
    Application,
    /// The round trip itself failed, or the client could not be set up for it
    Transport,
}

impl SearchError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SearchError::NoFileSelected
            | SearchError::MissingUrl
            | SearchError::InvalidUrl(_)
            | SearchError::MissingImageId
            | SearchError::FileRead(_) => ErrorCategory::Validation,
            SearchError::Application { .. } => ErrorCategory::Application,
            SearchError::Network(_)
            | SearchError::Timeout
            | SearchError::InvalidResponse(_)
            | SearchError::Configuration(_) => ErrorCategory::Transport,
        }
    }

    pub fn help_text(&self) -> Option<&'static str> {
        match self {
            SearchError::NoFileSelected => Some("Pass an image with --file or --base64"),
            SearchError::MissingUrl | SearchError::InvalidUrl(_) => {
                Some("Pass an absolute URL, e.g. --url https://example.com/a.jpg")
            }
            SearchError::MissingImageId => Some("Pass the id shown by `image-search images`"),
            SearchError::Network(_) => {
                Some("Check that the search service is running and reachable")
            }
            SearchError::Timeout => Some("Try again or raise the timeout with --timeout"),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SearchError::Timeout
        } else if err.is_decode() {
            SearchError::InvalidResponse(err.to_string())
        } else if err.is_builder() {
            SearchError::Configuration(err.to_string())
        } else {
            SearchError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for SearchError {
    fn from(err: serde_json::Error) -> Self {
        SearchError::InvalidResponse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            SearchError::NoFileSelected.to_string(),
            "No image file selected"
        );
        assert_eq!(
            SearchError::Application {
                status: "50001".to_string(),
                message: "bad pipeline".to_string(),
            }
            .to_string(),
            "request rejected [50001][bad pipeline]"
        );
        let network = SearchError::Network("Connection refused".to_string());
        assert_eq!(network.to_string(), "Network error: Connection refused");
        let invalid = SearchError::InvalidUrl("not a url".to_string());
        assert_eq!(invalid.to_string(), "Invalid image URL 'not a url'");
    }

    #[test]
    fn test_categories() {
        assert_eq!(
            SearchError::NoFileSelected.category(),
            ErrorCategory::Validation
        );
        assert_eq!(
            SearchError::MissingImageId.category(),
            ErrorCategory::Validation
        );
        assert_eq!(
            SearchError::Application {
                status: "20001".to_string(),
                message: String::new(),
            }
            .category(),
            ErrorCategory::Application
        );
        assert_eq!(SearchError::Timeout.category(), ErrorCategory::Transport);
        assert_eq!(
            SearchError::InvalidResponse("eof".to_string()).category(),
            ErrorCategory::Transport
        );
    }

    #[test]
    fn test_configuration_errors_are_transport_failures() {
        let err = SearchError::Configuration("bad mime".to_string());
        assert_eq!(err.category(), ErrorCategory::Transport);
        assert_eq!(err.help_text(), None);
    }

    #[test]
    fn test_help_text() {
        let help = SearchError::NoFileSelected.help_text().unwrap();
        assert!(help.contains("--file"));
        assert!(SearchError::Timeout.help_text().is_some());
        assert_eq!(
            SearchError::Application {
                status: "1".to_string(),
                message: "x".to_string(),
            }
            .help_text(),
            None
        );
    }

    #[test]
    fn test_from_serde_error() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(matches!(
            SearchError::from(err),
            SearchError::InvalidResponse(_)
        ));
    }
}

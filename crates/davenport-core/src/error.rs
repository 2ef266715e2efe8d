use thiserror::Error;

/// Top-level error type for the Davenport system.
///
/// Each variant wraps a subsystem-specific failure. Subsystem crates define
/// their own error types and implement `From` conversions so that the `?`
/// operator works seamlessly across crate boundaries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DavenportError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Session error: {0}")]
    Session(String),

    #[error("Order error: {0}")]
    Order(String),

    #[error("Retrieval error: {0}")]
    Retrieval(String),

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for DavenportError {
    fn from(err: toml::de::Error) -> Self {
        DavenportError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for DavenportError {
    fn from(err: toml::ser::Error) -> Self {
        DavenportError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for DavenportError {
    fn from(err: serde_json::Error) -> Self {
        DavenportError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for Davenport operations.
pub type Result<T> = std::result::Result<T, DavenportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DavenportError::Config("missing field".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing field");

        let err = DavenportError::Order("duplicate id".to_string());
        assert_eq!(err.to_string(), "Order error: duplicate id");

        let err = DavenportError::Llm("model overloaded".to_string());
        assert_eq!(err.to_string(), "LLM error: model overloaded");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: DavenportError = io_err.into();
        assert!(matches!(err, DavenportError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_error_from_toml_de() {
        let bad_toml = "invalid = [[[";
        let parsed: std::result::Result<toml::Value, _> = toml::from_str(bad_toml);
        let err: DavenportError = parsed.unwrap_err().into();
        assert!(matches!(err, DavenportError::Config(_)));
    }

    #[test]
    fn test_error_from_serde_json() {
        let bad_json = "{ invalid json }";
        let parsed: std::result::Result<serde_json::Value, _> = serde_json::from_str(bad_json);
        let err: DavenportError = parsed.unwrap_err().into();
        assert!(matches!(err, DavenportError::Serialization(_)));
    }

    #[test]
    fn test_result_type_with_question_mark() {
        fn inner() -> Result<String> {
            let io_result: std::result::Result<i32, std::io::Error> = Ok(42);
            let _value = io_result?;
            Ok("success".to_string())
        }

        assert_eq!(inner().unwrap(), "success");
    }
}

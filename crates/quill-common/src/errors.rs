use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),

    #[error("missing credential: set {0} in the environment or a .env file")]
    MissingCredential(String),
}

#[derive(Debug, thiserror::Error)]
pub enum QuillError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("ai error: {0}")]
    Ai(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::FileNotFound(PathBuf::from("/tmp/missing.toml"));
        assert_eq!(err.to_string(), "config file not found: /tmp/missing.toml");

        let err = ConfigError::ParseError("unexpected token".into());
        assert_eq!(err.to_string(), "config parse error: unexpected token");

        let err = ConfigError::ValidationError("api.temperature = 3 is out of range".into());
        assert_eq!(
            err.to_string(),
            "config validation error: api.temperature = 3 is out of range"
        );
    }

    #[test]
    fn missing_credential_names_the_variable() {
        let err = ConfigError::MissingCredential("OPENAI_API_KEY".into());
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }

    #[test]
    fn quill_error_from_config() {
        let config_err = ConfigError::ParseError("bad toml".into());
        let err: QuillError = config_err.into();
        assert!(matches!(err, QuillError::Config(_)));
        assert!(err.to_string().contains("bad toml"));
    }

    #[test]
    fn quill_error_ai_display() {
        let err = QuillError::Ai("model unavailable".into());
        assert_eq!(err.to_string(), "ai error: model unavailable");
    }
}

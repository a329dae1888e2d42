//! Startup wiring: credential check and completion client construction.

use std::sync::Arc;
use std::time::Duration;

use quill_ai::{ConversationDriver, OpenAiClient, OpenAiConfig};
use quill_common::QuillError;
use quill_config::ApiConfig;

/// Build the conversation driver from the `[api]` section.
///
/// Fails when the credential variable is unset, so the problem is reported
/// at startup rather than on the first message.
pub(crate) fn build_driver(api: &ApiConfig) -> Result<ConversationDriver, QuillError> {
    let api_key = quill_config::resolve_api_key(api)?;

    let config = OpenAiConfig::new(api_key)
        .with_model(&api.model)
        .with_temperature(api.temperature)
        .with_base_url(&api.base_url)
        .with_timeouts(
            Duration::from_secs(u64::from(api.connect_timeout_secs)),
            Duration::from_secs(u64::from(api.request_timeout_secs)),
        );
    tracing::debug!(?config, "Completion client configured");

    let client = OpenAiClient::new(config).map_err(|e| QuillError::Ai(e.to_string()))?;
    Ok(ConversationDriver::new(Arc::new(client)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_common::ConfigError;

    #[test]
    fn missing_credential_is_a_config_error() {
        let api = ApiConfig {
            api_key_env: "QUILL_INIT_TEST_UNSET_91C2".into(),
            ..ApiConfig::default()
        };
        let err = build_driver(&api).err().unwrap();
        assert!(matches!(
            err,
            QuillError::Config(ConfigError::MissingCredential(_))
        ));
    }

    #[test]
    fn present_credential_builds_driver_with_configured_model() {
        let api = ApiConfig {
            api_key_env: "PATH".into(),
            model: "gpt-4o-mini".into(),
            ..ApiConfig::default()
        };
        let driver = build_driver(&api).unwrap();
        assert_eq!(driver.model(), "gpt-4o-mini");
    }
}

//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> &'static str {
    r##"# Quill Configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.
# The API key is read from the environment (or a .env file), never from here.

[api]
# model = "gpt-3.5-turbo"
# temperature = 0.7              # 0.0-2.0
# base_url = "https://api.openai.com/v1"
# api_key_env = "OPENAI_API_KEY"
# connect_timeout_secs = 10      # 1-600
# request_timeout_secs = 120     # 1-3600

[ui]
# default_tool = "Paraphrase"    # Paraphrase, Fix Grammar, Abstract Writing
# show_descriptions = true

[logging]
# level = "info"                 # trace, debug, info, warn, error
"##
}

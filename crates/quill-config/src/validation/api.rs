//! Validation for the `[api]` section.

use crate::schema::QuillConfig;

use super::helpers::{validate_non_empty, validate_range, validate_range_f64};

pub(crate) fn validate_api(errors: &mut Vec<String>, config: &QuillConfig) {
    let api = &config.api;

    validate_non_empty(errors, "api.model", &api.model);
    validate_non_empty(errors, "api.api_key_env", &api.api_key_env);
    validate_range_f64(errors, "api.temperature", api.temperature, 0.0, 2.0);
    validate_range(
        errors,
        "api.connect_timeout_secs",
        api.connect_timeout_secs,
        1,
        600,
    );
    validate_range(
        errors,
        "api.request_timeout_secs",
        api.request_timeout_secs,
        1,
        3600,
    );

    if !(api.base_url.starts_with("https://") || api.base_url.starts_with("http://")) {
        errors.push(format!(
            "api.base_url = {:?} must start with http:// or https://",
            api.base_url
        ));
    }
}

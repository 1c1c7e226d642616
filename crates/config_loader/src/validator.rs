//! Configuration validation
//!
//! Rules:
//! - dispatch.workers > 0
//! - dispatch.queue_capacity > 0
//! - server.port > 0
//! - backend names are non-empty
//! - slack backends carry an http(s) `webhook_url`
//! - email backends carry a `to` address
//!
//! Duplicate backend names are left to registration, which rejects the second one.

use contracts::{BackendConfig, BackendType, ContractError, ServiceSettings};

/// Validate ServiceSettings
///
/// Returns the first error encountered, or Ok(()).
pub fn validate(settings: &ServiceSettings) -> Result<(), ContractError> {
    validate_server(settings)?;
    validate_dispatch(settings)?;
    validate_backends(settings)?;
    Ok(())
}

fn validate_server(settings: &ServiceSettings) -> Result<(), ContractError> {
    if settings.server.port == 0 {
        return Err(ContractError::config_validation(
            "server.port",
            "port must be > 0",
        ));
    }
    Ok(())
}

fn validate_dispatch(settings: &ServiceSettings) -> Result<(), ContractError> {
    let dispatch = &settings.dispatch;

    if dispatch.workers == 0 {
        return Err(ContractError::config_validation(
            "dispatch.workers",
            "workers must be > 0",
        ));
    }

    if dispatch.queue_capacity == 0 {
        return Err(ContractError::config_validation(
            "dispatch.queue_capacity",
            "queue_capacity must be > 0",
        ));
    }

    Ok(())
}

fn validate_backends(settings: &ServiceSettings) -> Result<(), ContractError> {
    for (idx, backend) in settings.backends.iter().enumerate() {
        if backend.name.trim().is_empty() {
            return Err(ContractError::config_validation(
                format!("backends[{}].name", idx),
                "backend name cannot be empty",
            ));
        }

        match backend.backend_type {
            BackendType::Slack => validate_slack_params(backend)?,
            BackendType::Email => validate_email_params(backend)?,
            BackendType::Log => {}
        }
    }
    Ok(())
}

fn validate_slack_params(backend: &BackendConfig) -> Result<(), ContractError> {
    let field = format!("backends[name={}].params.webhook_url", backend.name);
    let url = backend
        .params
        .get("webhook_url")
        .ok_or_else(|| ContractError::config_validation(&field, "missing webhook_url"))?;

    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ContractError::config_validation(
            field,
            format!("webhook_url must be an http(s) URL, got '{}'", url),
        ));
    }
    Ok(())
}

fn validate_email_params(backend: &BackendConfig) -> Result<(), ContractError> {
    let field = format!("backends[name={}].params.to", backend.name);
    let to = backend
        .params
        .get("to")
        .ok_or_else(|| ContractError::config_validation(&field, "missing recipient address"))?;

    if !to.contains('@') {
        return Err(ContractError::config_validation(
            field,
            format!("invalid recipient address '{}'", to),
        ));
    }
    Ok(())
}

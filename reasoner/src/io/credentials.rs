//! API key loading for the hosted backend.

use std::fmt;

/// Missing or unusable credential. Fatal at startup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialError {
    #[error("missing API key: environment variable {0} is not set")]
    Missing(String),
    #[error("API key in environment variable {0} is empty")]
    Empty(String),
}

/// API key that never prints its value.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

/// Read the API key from the process environment.
pub fn api_key_from_env(var: &str) -> Result<ApiKey, CredentialError> {
    api_key_from_lookup(var, |name| std::env::var(name).ok())
}

/// Read the API key through `lookup`, which maps a variable name to its value.
pub fn api_key_from_lookup<F>(var: &str, lookup: F) -> Result<ApiKey, CredentialError>
where
    F: Fn(&str) -> Option<String>,
{
    let value = lookup(var).ok_or_else(|| CredentialError::Missing(var.to_string()))?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CredentialError::Empty(var.to_string()));
    }
    Ok(ApiKey(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_variable_is_reported_by_name() {
        let err = api_key_from_lookup("API_KEY", |_| None).unwrap_err();
        assert_eq!(err, CredentialError::Missing("API_KEY".to_string()));
        assert!(err.to_string().contains("API_KEY"));
    }

    #[test]
    fn blank_value_is_rejected() {
        let err = api_key_from_lookup("API_KEY", |_| Some("  ".to_string())).unwrap_err();
        assert_eq!(err, CredentialError::Empty("API_KEY".to_string()));
    }

    #[test]
    fn key_is_trimmed_and_redacted_in_debug() {
        let key = api_key_from_lookup("API_KEY", |name| {
            (name == "API_KEY").then(|| "secret-123\n".to_string())
        })
        .expect("key");
        assert_eq!(key.expose(), "secret-123");
        assert!(!format!("{key:?}").contains("secret"));
    }
}

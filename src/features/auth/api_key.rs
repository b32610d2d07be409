use std::collections::HashSet;

use crate::core::error::AppError;

use super::model::ApiClient;

/// Checks request API keys against the configured set
#[derive(Debug, Clone)]
pub struct ApiKeyValidator {
    keys: HashSet<String>,
}

impl ApiKeyValidator {
    pub fn new(keys: impl IntoIterator<Item = String>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
        }
    }

    pub fn validate(&self, key: Option<&str>) -> Result<ApiClient, AppError> {
        let key = key
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| AppError::Unauthorized("Missing API key".to_string()))?;

        if !self.keys.contains(key) {
            return Err(AppError::Unauthorized("Invalid API key".to_string()));
        }

        Ok(ApiClient::from_key(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator() -> ApiKeyValidator {
        ApiKeyValidator::new(vec!["key-one".to_string(), "key-two".to_string()])
    }

    #[test]
    fn test_accepts_known_key() {
        let client = validator().validate(Some("key-two")).unwrap();
        assert_eq!(client.key_hint, "...-two");
    }

    #[test]
    fn test_rejects_missing_and_blank_key() {
        let err = validator().validate(None).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(msg) if msg == "Missing API key"));

        let err = validator().validate(Some("   ")).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(msg) if msg == "Missing API key"));
    }

    #[test]
    fn test_rejects_unknown_key() {
        let err = validator().validate(Some("key-three")).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(msg) if msg == "Invalid API key"));
    }
}

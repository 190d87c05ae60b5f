//! Configuration types.

use secrecy::SecretString;

use crate::error::ConfigError;

/// Default Gemini model for Wingman chat.
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

/// Default Generative Language API host.
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";

/// Thinking budget sent when nothing else is configured. Zero disables
/// extended reasoning, which keeps chat replies fast.
pub const DEFAULT_THINKING_BUDGET: u32 = 0;

/// Wingman assistant configuration.
#[derive(Debug, Clone)]
pub struct WingmanConfig {
    /// API key for the text-generation service. `None` leaves the assistant
    /// unconfigured; it then answers with a fixed notice instead of calling out.
    pub api_key: Option<SecretString>,
    /// Model identifier.
    pub model: String,
    /// Base URL of the Generative Language API (no trailing slash).
    pub api_base: String,
    /// Thinking budget per request. `None` omits the thinking config entirely.
    pub thinking_budget: Option<u32>,
}

impl Default for WingmanConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            thinking_budget: Some(DEFAULT_THINKING_BUDGET),
        }
    }
}

impl WingmanConfig {
    /// Load configuration from process environment variables.
    ///
    /// - `GEMINI_API_KEY` (falls back to `API_KEY`)
    /// - `WINGMAN_MODEL`
    /// - `WINGMAN_API_BASE`
    /// - `WINGMAN_THINKING_BUDGET` (integer, or `off`)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_key = non_blank("GEMINI_API_KEY")
            .or_else(|| non_blank("API_KEY"))
            .map(SecretString::from);

        let model = non_blank("WINGMAN_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let api_base = non_blank("WINGMAN_API_BASE")
            .map(|base| base.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        if !api_base.starts_with("http://") && !api_base.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                key: "WINGMAN_API_BASE".to_string(),
                message: format!("expected an http(s) URL, got {:?}", api_base),
            });
        }

        let thinking_budget = match non_blank("WINGMAN_THINKING_BUDGET") {
            None => Some(DEFAULT_THINKING_BUDGET),
            Some(raw) if raw.eq_ignore_ascii_case("off") => None,
            Some(raw) => Some(raw.parse::<u32>().map_err(|e| ConfigError::InvalidValue {
                key: "WINGMAN_THINKING_BUDGET".to_string(),
                message: format!("{:?}: {}", raw, e),
            })?),
        };

        Ok(Self {
            api_key,
            model,
            api_base,
            thinking_budget,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use secrecy::ExposeSecret;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_env_empty() {
        let config = WingmanConfig::from_lookup(lookup_from(&[])).unwrap();
        assert!(config.api_key.is_none());
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.thinking_budget, Some(0));
    }

    #[test]
    fn test_gemini_key_preferred_over_api_key() {
        let config = WingmanConfig::from_lookup(lookup_from(&[
            ("GEMINI_API_KEY", "gemini-key"),
            ("API_KEY", "generic-key"),
        ]))
        .unwrap();
        assert_eq!(config.api_key.unwrap().expose_secret(), "gemini-key");
    }

    #[test]
    fn test_api_key_fallback() {
        let config =
            WingmanConfig::from_lookup(lookup_from(&[("API_KEY", "generic-key")])).unwrap();
        assert_eq!(config.api_key.unwrap().expose_secret(), "generic-key");
    }

    #[test]
    fn test_blank_key_is_absent() {
        let config =
            WingmanConfig::from_lookup(lookup_from(&[("GEMINI_API_KEY", "   ")])).unwrap();
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = WingmanConfig::from_lookup(lookup_from(&[
            ("WINGMAN_MODEL", "gemini-2.5-flash"),
            ("WINGMAN_API_BASE", "http://127.0.0.1:9000/"),
            ("WINGMAN_THINKING_BUDGET", "512"),
        ]))
        .unwrap();
        assert_eq!(config.model, "gemini-2.5-flash");
        assert_eq!(config.api_base, "http://127.0.0.1:9000");
        assert_eq!(config.thinking_budget, Some(512));
    }

    #[test]
    fn test_thinking_budget_off() {
        let config =
            WingmanConfig::from_lookup(lookup_from(&[("WINGMAN_THINKING_BUDGET", "OFF")])).unwrap();
        assert_eq!(config.thinking_budget, None);
    }

    #[test]
    fn test_invalid_thinking_budget() {
        let err = WingmanConfig::from_lookup(lookup_from(&[("WINGMAN_THINKING_BUDGET", "lots")]))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { ref key, .. } if key == "WINGMAN_THINKING_BUDGET"
        ));
    }

    #[test]
    fn test_invalid_api_base() {
        let err = WingmanConfig::from_lookup(lookup_from(&[("WINGMAN_API_BASE", "ftp://nope")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }
}

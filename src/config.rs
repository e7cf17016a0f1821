use std::str::FromStr;

use web_sys::Document;

pub const SUBMIT_ENDPOINT: &str = "/submit-quiz-answer";
pub const THEME_STORAGE_KEY: &str = "theme";
pub const THEME_TRANSITION_MS: u32 = 300;

/// Page-level settings. Defaults match the server's routes; a page can
/// override them with `data-*` attributes on `<html>`.
#[derive(Debug, Clone, PartialEq)]
pub struct GuideConfig {
    pub submit_endpoint: String,
    pub theme_storage_key: String,
    pub theme_transition_ms: u32,
    pub log_level: log::Level,
}

impl Default for GuideConfig {
    fn default() -> Self {
        Self {
            submit_endpoint: SUBMIT_ENDPOINT.to_string(),
            theme_storage_key: THEME_STORAGE_KEY.to_string(),
            theme_transition_ms: THEME_TRANSITION_MS,
            log_level: if cfg!(debug_assertions) {
                log::Level::Debug
            } else {
                log::Level::Info
            },
        }
    }
}

impl GuideConfig {
    pub fn from_document(document: &Document) -> Self {
        let mut config = Self::default();
        if let Some(root) = document.document_element() {
            config.apply_overrides(|name| root.get_attribute(name));
        }
        config
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(endpoint) = lookup("data-quiz-endpoint").filter(|v| !v.trim().is_empty()) {
            self.submit_endpoint = endpoint.trim().to_string();
        }
        if let Some(key) = lookup("data-theme-key").filter(|v| !v.trim().is_empty()) {
            self.theme_storage_key = key.trim().to_string();
        }
        if let Some(level) = lookup("data-log-level").and_then(|v| log::Level::from_str(v.trim()).ok()) {
            self.log_level = level;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn overridden(attrs: &[(&str, &str)]) -> GuideConfig {
        let attrs: HashMap<String, String> = attrs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let mut config = GuideConfig::default();
        config.apply_overrides(|name| attrs.get(name).cloned());
        config
    }

    #[test]
    fn defaults_without_attributes() {
        let config = overridden(&[]);
        assert_eq!(config.submit_endpoint, "/submit-quiz-answer");
        assert_eq!(config.theme_storage_key, "theme");
        assert_eq!(config.theme_transition_ms, 300);
    }

    #[test]
    fn attributes_override_defaults() {
        let config = overridden(&[
            ("data-quiz-endpoint", "/api/quiz"),
            ("data-theme-key", "guide-theme"),
            ("data-log-level", "warn"),
        ]);
        assert_eq!(config.submit_endpoint, "/api/quiz");
        assert_eq!(config.theme_storage_key, "guide-theme");
        assert_eq!(config.log_level, log::Level::Warn);
    }

    #[test]
    fn blank_or_bad_values_are_ignored() {
        let config = overridden(&[("data-quiz-endpoint", "  "), ("data-log-level", "loud")]);
        assert_eq!(config.submit_endpoint, SUBMIT_ENDPOINT);
        assert_eq!(config.log_level, GuideConfig::default().log_level);
    }
}

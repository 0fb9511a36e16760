//! Localized notification text.
//!
//! The catalogue is embedded at compile time from `i18n/notifications.toml`.
//! Unknown keys resolve to the key itself so a missing entry is visible
//! instead of silently blank.

use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::HashMap;

use em_shared::Language;

/// Message keys used by the verification flow
pub mod keys {
    pub const VERIFY_SUCCESS_TITLE: &str = "verify_success_title";
    pub const VERIFY_SUCCESS_BODY: &str = "verify_success_body";
    pub const VERIFY_FAILED_TITLE: &str = "verify_failed_title";
    pub const CODE_RESENT_TITLE: &str = "code_resent_title";
    pub const CODE_RESENT_BODY: &str = "code_resent_body";
    pub const RESEND_FAILED_TITLE: &str = "resend_failed_title";
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocalizedText {
    pub en: String,
    pub zh: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageCatalogue {
    #[serde(default)]
    pub messages: HashMap<String, LocalizedText>,
}

static CATALOGUE: Lazy<MessageCatalogue> = Lazy::new(|| {
    let raw = include_str!("../../i18n/notifications.toml");
    toml::from_str(raw).unwrap_or_else(|e| {
        tracing::error!(error = %e, "Failed to parse notification catalogue");
        MessageCatalogue::default()
    })
});

impl MessageCatalogue {
    /// Text for `key` in `language`, or the key itself when missing
    pub fn get(&self, key: &str, language: Language) -> String {
        match self.messages.get(key) {
            Some(text) => match language {
                Language::English => text.en.clone(),
                Language::Chinese => text.zh.clone(),
            },
            None => key.to_string(),
        }
    }
}

/// Look up a message in the embedded catalogue
pub fn message(key: &str, language: Language) -> String {
    CATALOGUE.get(key, language)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_key_has_both_languages() {
        for key in [
            keys::VERIFY_SUCCESS_TITLE,
            keys::VERIFY_SUCCESS_BODY,
            keys::VERIFY_FAILED_TITLE,
            keys::CODE_RESENT_TITLE,
            keys::CODE_RESENT_BODY,
            keys::RESEND_FAILED_TITLE,
        ] {
            let en = message(key, Language::English);
            let zh = message(key, Language::Chinese);
            assert_ne!(en, key, "missing English text for {}", key);
            assert_ne!(zh, key, "missing Chinese text for {}", key);
        }
    }

    #[test]
    fn test_lookup() {
        assert_eq!(message(keys::VERIFY_SUCCESS_TITLE, Language::English), "Email verified");
        assert_eq!(message(keys::VERIFY_SUCCESS_TITLE, Language::Chinese), "邮箱已验证");
    }

    #[test]
    fn test_unknown_key_falls_back_to_key() {
        assert_eq!(message("no_such_key", Language::English), "no_such_key");
    }
}

//! Message keys and locales for client-facing copy.
//!
//! The domain only names *which* message it wants; templates live behind the
//! [`MessageCatalog`](super::ports::MessageCatalog) port.

use std::fmt;

/// Catalogue key of a client-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    /// `{0}` is the clashing id.
    UserAlreadyExists,
    UserCreated,
    /// `{0}` is the missing id.
    UserNotFound,
    UserDeleted,
    /// No positive id follows the highest stored one.
    UserIdsExhausted,
}

impl MessageKey {
    /// Dotted catalogue key, e.g. `user.not.found`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::UserAlreadyExists => "user.already.exists",
            Self::UserCreated => "user.created.success",
            Self::UserNotFound => "user.not.found",
            Self::UserDeleted => "user.deleted.success",
            Self::UserIdsExhausted => "user.id.exhausted",
        }
    }
}

impl fmt::Display for MessageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Primary language subtag used to select a message bundle (`en`, `fr`).
///
/// Region and script subtags are dropped; `en-GB` and `en` select the same
/// bundle.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale(String);

impl Locale {
    /// Build a locale from a language tag, keeping only its primary subtag.
    ///
    /// # Examples
    /// ```
    /// use users_api::domain::Locale;
    ///
    /// assert_eq!(Locale::new("fr-CA").as_str(), "fr");
    /// assert_eq!(Locale::new("NL").as_str(), "nl");
    /// ```
    pub fn new(tag: impl AsRef<str>) -> Self {
        let primary = tag
            .as_ref()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        Self(primary)
    }

    /// English, the fallback bundle.
    pub fn english() -> Self {
        Self("en".to_owned())
    }

    /// Primary language subtag.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::english()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for message keys and locale normalisation.

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(MessageKey::UserAlreadyExists, "user.already.exists")]
    #[case(MessageKey::UserCreated, "user.created.success")]
    #[case(MessageKey::UserNotFound, "user.not.found")]
    #[case(MessageKey::UserDeleted, "user.deleted.success")]
    #[case(MessageKey::UserIdsExhausted, "user.id.exhausted")]
    fn keys_use_dotted_names(#[case] key: MessageKey, #[case] expected: &str) {
        assert_eq!(key.as_str(), expected);
    }

    #[rstest]
    #[case("en-GB", "en")]
    #[case("fr", "fr")]
    #[case("nl_BE", "nl")]
    #[case(" DE ", "de")]
    fn locale_keeps_primary_language(#[case] tag: &str, #[case] expected: &str) {
        assert_eq!(Locale::new(tag).as_str(), expected);
    }

    #[rstest]
    fn default_locale_is_english() {
        assert_eq!(Locale::default(), Locale::english());
    }
}

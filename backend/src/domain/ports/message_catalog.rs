//! Port for resolving localised, keyed message templates.

use crate::domain::{Locale, MessageKey};

/// Keyed message templates with positional arguments.
///
/// Templates reference arguments as `{0}`, `{1}`, ... Implementations fall
/// back to their default locale when the requested one has no bundle.
pub trait MessageCatalog: Send + Sync {
    /// Render `key` for `locale`, substituting `args` into the template.
    fn message(&self, key: MessageKey, locale: &Locale, args: &[&str]) -> String;

    /// Whether a bundle exists for `locale`.
    fn supports(&self, locale: &Locale) -> bool;

    /// Locale used when negotiation finds no supported candidate.
    fn default_locale(&self) -> Locale;

    /// Pick the first supported locale from `preferred`, best first.
    fn negotiate(&self, preferred: &[Locale]) -> Locale {
        preferred
            .iter()
            .find(|locale| self.supports(locale))
            .cloned()
            .unwrap_or_else(|| self.default_locale())
    }
}

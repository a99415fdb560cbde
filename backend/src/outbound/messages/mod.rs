//! Built-in message bundles implementing [`MessageCatalog`].
//!
//! Templates use positional `{0}` placeholders. English is the fallback for
//! unsupported locales and for keys a bundle leaves out.

use tracing::debug;

use crate::domain::ports::MessageCatalog;
use crate::domain::{Locale, MessageKey};

type Bundle = &'static [(MessageKey, &'static str)];

const ENGLISH: Bundle = &[
    (MessageKey::UserAlreadyExists, "User with id {0} already exists"),
    (MessageKey::UserCreated, "User Created Successfully"),
    (MessageKey::UserNotFound, "User with id {0} not found"),
    (MessageKey::UserDeleted, "User Deleted Successfully"),
    (MessageKey::UserIdsExhausted, "No user id is left to assign"),
];

const FRENCH: Bundle = &[
    (
        MessageKey::UserAlreadyExists,
        "L'utilisateur avec l'identifiant {0} existe déjà",
    ),
    (MessageKey::UserCreated, "Utilisateur créé avec succès"),
    (
        MessageKey::UserNotFound,
        "Utilisateur avec l'identifiant {0} introuvable",
    ),
    (MessageKey::UserDeleted, "Utilisateur supprimé avec succès"),
    (
        MessageKey::UserIdsExhausted,
        "Plus aucun identifiant d'utilisateur n'est disponible",
    ),
];

const DUTCH: Bundle = &[
    (MessageKey::UserAlreadyExists, "Gebruiker met id {0} bestaat al"),
    (MessageKey::UserCreated, "Gebruiker succesvol aangemaakt"),
    (MessageKey::UserNotFound, "Gebruiker met id {0} niet gevonden"),
    (MessageKey::UserDeleted, "Gebruiker succesvol verwijderd"),
    (MessageKey::UserIdsExhausted, "Er is geen gebruikers-id meer vrij"),
];

/// Catalogue compiled into the binary with `en`, `fr` and `nl` bundles.
///
/// # Examples
/// ```
/// use users_api::domain::ports::MessageCatalog;
/// use users_api::domain::{Locale, MessageKey};
/// use users_api::outbound::messages::StaticMessageCatalog;
///
/// let text = StaticMessageCatalog.message(MessageKey::UserNotFound, &Locale::new("nl"), &["7"]);
/// assert_eq!(text, "Gebruiker met id 7 niet gevonden");
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct StaticMessageCatalog;

impl StaticMessageCatalog {
    fn bundle(locale: &Locale) -> Option<Bundle> {
        match locale.as_str() {
            "en" => Some(ENGLISH),
            "fr" => Some(FRENCH),
            "nl" => Some(DUTCH),
            _ => None,
        }
    }

    fn template(key: MessageKey, locale: &Locale) -> &'static str {
        let lookup = |bundle: Bundle| {
            bundle
                .iter()
                .find(|(candidate, _)| *candidate == key)
                .map(|(_, template)| *template)
        };
        Self::bundle(locale)
            .and_then(lookup)
            .or_else(|| lookup(ENGLISH))
            .unwrap_or_else(|| {
                debug!(%key, %locale, "message key missing from every bundle");
                key.as_str()
            })
    }
}

fn fill(template: &str, args: &[&str]) -> String {
    args.iter()
        .enumerate()
        .fold(template.to_owned(), |text, (index, arg)| {
            text.replace(&format!("{{{index}}}"), arg)
        })
}

impl MessageCatalog for StaticMessageCatalog {
    fn message(&self, key: MessageKey, locale: &Locale, args: &[&str]) -> String {
        fill(Self::template(key, locale), args)
    }

    fn supports(&self, locale: &Locale) -> bool {
        Self::bundle(locale).is_some()
    }

    fn default_locale(&self) -> Locale {
        Locale::english()
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for the built-in bundles and placeholder substitution.

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("en", "User with id 3 already exists")]
    #[case("fr", "L'utilisateur avec l'identifiant 3 existe déjà")]
    #[case("nl", "Gebruiker met id 3 bestaat al")]
    fn conflict_message_is_localised(#[case] tag: &str, #[case] expected: &str) {
        let text = StaticMessageCatalog.message(
            MessageKey::UserAlreadyExists,
            &Locale::new(tag),
            &["3"],
        );
        assert_eq!(text, expected);
    }

    #[rstest]
    fn unsupported_locale_falls_back_to_english() {
        let text = StaticMessageCatalog.message(MessageKey::UserCreated, &Locale::new("ja"), &[]);
        assert_eq!(text, "User Created Successfully");
    }

    #[rstest]
    fn every_bundle_covers_every_key() {
        let keys = [
            MessageKey::UserAlreadyExists,
            MessageKey::UserCreated,
            MessageKey::UserNotFound,
            MessageKey::UserDeleted,
            MessageKey::UserIdsExhausted,
        ];
        for bundle in [ENGLISH, FRENCH, DUTCH] {
            for key in keys {
                assert!(
                    bundle.iter().any(|(candidate, _)| *candidate == key),
                    "missing {key}"
                );
            }
        }
    }

    #[rstest]
    fn negotiation_picks_first_supported_locale() {
        let preferred = [Locale::new("de"), Locale::new("nl-BE"), Locale::new("fr")];
        assert_eq!(StaticMessageCatalog.negotiate(&preferred), Locale::new("nl"));
    }

    #[rstest]
    fn negotiation_without_candidates_uses_english() {
        assert_eq!(StaticMessageCatalog.negotiate(&[]), Locale::english());
    }

    #[rstest]
    fn fill_replaces_every_occurrence() {
        assert_eq!(fill("{0} and {1}, again {0}", &["a", "b"]), "a and b, again a");
    }
}

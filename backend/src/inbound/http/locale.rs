//! Request locale negotiation.
//!
//! The `Accept-Language` header is ranked by quality and matched against
//! the bundles the message catalogue supports. Wildcards, unsupported
//! languages and malformed headers resolve to the catalogue's default.

use actix_web::http::header::{AcceptLanguage, Header, Preference};
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::{Ready, ready};
use tracing::debug;

use crate::domain::Locale;
use crate::inbound::http::state::HttpState;

/// Locale negotiated for the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLocale(pub Locale);

impl RequestLocale {
    /// Locale the catalogue settled on.
    #[rustfmt::skip]
    pub fn locale(&self) -> &Locale { &self.0 }
}

/// Primary languages from `Accept-Language`, best first.
fn preferred_locales(req: &HttpRequest) -> Vec<Locale> {
    match AcceptLanguage::parse(req) {
        Ok(header) => header
            .ranked()
            .into_iter()
            .filter_map(|preference| match preference {
                Preference::Specific(tag) => Some(Locale::new(tag.primary_language())),
                Preference::Any => None,
            })
            .collect(),
        Err(error) => {
            debug!(%error, "ignoring malformed Accept-Language header");
            Vec::new()
        }
    }
}

impl FromRequest for RequestLocale {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let preferred = preferred_locales(req);
        let locale = req
            .app_data::<web::Data<HttpState>>()
            .map(|state| state.messages.negotiate(&preferred))
            .unwrap_or_default();
        ready(Ok(Self(locale)))
    }
}

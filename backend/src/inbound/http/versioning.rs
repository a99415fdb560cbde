//! Routing keys selecting an API version on read-by-id.
//!
//! Besides the path prefix, v1 and v2 lookups are reachable through a
//! `version` query parameter, an `X-API-VERSION` header and a vendor media
//! type in `Accept`. The guards here only decide routing; every route ends in
//! the same lookup.

use actix_web::guard::{self, Guard, GuardContext};
use actix_web::http::header;

/// Header carrying the requested version number.
pub const VERSION_HEADER: &str = "X-API-VERSION";

/// Query parameter carrying the requested version number.
pub const VERSION_PARAM: &str = "version";

/// Versions reachable through the alternate routing keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiVersion {
    V1,
    V2,
}

impl ApiVersion {
    /// Version number as sent by clients.
    pub fn number(self) -> &'static str {
        match self {
            Self::V1 => "1",
            Self::V2 => "2",
        }
    }

    /// Path prefix of the version's scope.
    pub fn prefix(self) -> &'static str {
        match self {
            Self::V1 => "/v1",
            Self::V2 => "/v2",
        }
    }

    /// Vendor media type selecting this version.
    pub fn media_type(self) -> &'static str {
        match self {
            Self::V1 => "application/vnd.socialmedia.app-v1+json",
            Self::V2 => "application/vnd.socialmedia.app-v2+json",
        }
    }

    /// Matches `?version=<n>`.
    pub fn query_guard(self) -> impl Guard {
        guard::fn_guard(move |ctx| query_selects(ctx.head().uri.query(), self))
    }

    /// Matches `X-API-VERSION: <n>`.
    pub fn header_guard(self) -> impl Guard {
        guard::Header(VERSION_HEADER, self.number())
    }

    /// Matches an `Accept` header listing the vendor media type.
    pub fn media_type_guard(self) -> impl Guard {
        guard::fn_guard(move |ctx| accepts(ctx, self.media_type()))
    }
}

fn query_selects(query: Option<&str>, version: ApiVersion) -> bool {
    query.is_some_and(|query| {
        query.split('&').any(|pair| {
            pair.split_once('=')
                .is_some_and(|(key, value)| key == VERSION_PARAM && value == version.number())
        })
    })
}

fn accepts(ctx: &GuardContext<'_>, media_type: &str) -> bool {
    ctx.head()
        .headers()
        .get_all(header::ACCEPT)
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .map(|item| item.split(';').next().unwrap_or_default().trim())
        .any(|item| item.eq_ignore_ascii_case(media_type))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;
    use rstest::rstest;

    #[rstest]
    #[case(Some("version=1"), ApiVersion::V1, true)]
    #[case(Some("lang=fr&version=2"), ApiVersion::V2, true)]
    #[case(Some("version=2"), ApiVersion::V1, false)]
    #[case(Some("versions=1"), ApiVersion::V1, false)]
    #[case(None, ApiVersion::V1, false)]
    fn query_guard_matches_exact_version(
        #[case] query: Option<&str>,
        #[case] version: ApiVersion,
        #[case] expected: bool,
    ) {
        assert_eq!(query_selects(query, version), expected);
    }

    #[rstest]
    #[case("application/vnd.socialmedia.app-v2+json", ApiVersion::V2, true)]
    #[case("text/html, application/vnd.socialmedia.app-v1+json;q=0.9", ApiVersion::V1, true)]
    #[case("application/vnd.socialmedia.app-v1+json", ApiVersion::V2, false)]
    #[case("application/json", ApiVersion::V1, false)]
    fn media_type_guard_matches_listed_type(
        #[case] accept: &str,
        #[case] version: ApiVersion,
        #[case] expected: bool,
    ) {
        let req = TestRequest::default()
            .insert_header((header::ACCEPT, accept))
            .to_srv_request();
        assert_eq!(version.media_type_guard().check(&req.guard_ctx()), expected);
    }

    #[rstest]
    #[case("2", ApiVersion::V2, true)]
    #[case("1", ApiVersion::V2, false)]
    fn header_guard_matches_version_number(
        #[case] value: &str,
        #[case] version: ApiVersion,
        #[case] expected: bool,
    ) {
        let req = TestRequest::default()
            .insert_header((VERSION_HEADER, value))
            .to_srv_request();
        assert_eq!(version.header_guard().check(&req.guard_ctx()), expected);
    }
}

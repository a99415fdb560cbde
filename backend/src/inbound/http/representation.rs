//! Response shapes per API version.
//!
//! Handlers are generic over a [`Representation`]; the representation turns
//! stored users and service messages into the version's JSON bodies.
//!
//! - [`Plain`]: records as stored (base and v1).
//! - [`Enriched`]: [`UserView`] projections and an `apiVersion` tag (v2).
//! - [`Hypermedia`]: HAL envelopes with `_links` and `_embedded` (v3).

use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{User, UserView};
use crate::inbound::http::links::Links;
use crate::inbound::http::versioning::ApiVersion;

/// Content type of plain JSON responses.
pub const JSON: &str = "application/json";

/// Content type of HAL responses.
pub const HAL_JSON: &str = "application/hal+json";

/// Inputs a representation may consult while shaping a response.
#[derive(Debug, Clone, Copy)]
pub struct Shaping<'a> {
    pub today: NaiveDate,
    pub links: &'a Links,
}

/// Strategy turning users and messages into one version's bodies.
pub trait Representation: 'static {
    /// Whether read-by-id of an absent user is `NotFound` rather than an
    /// empty `200`.
    const MISSING_IS_ERROR: bool = false;
    const CONTENT_TYPE: &'static str = JSON;

    type Item: Serialize;
    type Collection: Serialize;
    type Created: Serialize;
    type Deleted: Serialize;

    fn item(user: User, shaping: Shaping<'_>) -> Self::Item;
    fn collection(users: Vec<User>, shaping: Shaping<'_>) -> Self::Collection;
    fn created(user: User, message: String, shaping: Shaping<'_>) -> Self::Created;
    fn deleted(message: String, shaping: Shaping<'_>) -> Self::Deleted;
}

/// Representation also reachable through the alternate versioning routes.
pub trait VersionedRepresentation: Representation {
    const VERSION: ApiVersion;
}

/// `{message, data[, apiVersion]}` body of a create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedBody<T> {
    pub message: String,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_version: Option<&'static str>,
}

/// `{message[, apiVersion]}` body of a delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeletedBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, example = "v2")]
    pub api_version: Option<&'static str>,
}

/// Records as stored.
#[derive(Debug, Clone, Copy)]
pub struct Plain;

impl Representation for Plain {
    type Item = User;
    type Collection = Vec<User>;
    type Created = CreatedBody<User>;
    type Deleted = DeletedBody;

    fn item(user: User, _: Shaping<'_>) -> Self::Item {
        user
    }

    fn collection(users: Vec<User>, _: Shaping<'_>) -> Self::Collection {
        users
    }

    fn created(user: User, message: String, _: Shaping<'_>) -> Self::Created {
        CreatedBody {
            message,
            data: user,
            api_version: None,
        }
    }

    fn deleted(message: String, _: Shaping<'_>) -> Self::Deleted {
        DeletedBody {
            message,
            api_version: None,
        }
    }
}

impl VersionedRepresentation for Plain {
    const VERSION: ApiVersion = ApiVersion::V1;
}

/// Enriched views tagged with `apiVersion: "v2"`.
#[derive(Debug, Clone, Copy)]
pub struct Enriched;

const ENRICHED_TAG: &str = "v2";

impl Representation for Enriched {
    type Item = UserView;
    type Collection = Vec<UserView>;
    type Created = CreatedBody<UserView>;
    type Deleted = DeletedBody;

    fn item(user: User, shaping: Shaping<'_>) -> Self::Item {
        UserView::project(&user, shaping.today)
    }

    fn collection(users: Vec<User>, shaping: Shaping<'_>) -> Self::Collection {
        users
            .iter()
            .map(|user| UserView::project(user, shaping.today))
            .collect()
    }

    fn created(user: User, message: String, shaping: Shaping<'_>) -> Self::Created {
        CreatedBody {
            message,
            data: UserView::project(&user, shaping.today),
            api_version: Some(ENRICHED_TAG),
        }
    }

    fn deleted(message: String, _: Shaping<'_>) -> Self::Deleted {
        DeletedBody {
            message,
            api_version: Some(ENRICHED_TAG),
        }
    }
}

impl VersionedRepresentation for Enriched {
    const VERSION: ApiVersion = ApiVersion::V2;
}

/// HAL link object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Link {
    pub href: String,
}

impl Link {
    fn to(href: impl Into<String>) -> Self {
        Self { href: href.into() }
    }
}

/// `_links` of a user envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct UserLinks {
    #[serde(rename = "self")]
    pub self_link: Link,
    #[serde(rename = "all-users", skip_serializing_if = "Option::is_none")]
    pub all_users: Option<Link>,
}

/// User fields flattened next to their `_links`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct UserModel {
    #[serde(flatten)]
    pub user: User,
    #[serde(rename = "_links")]
    pub links: UserLinks,
}

/// `_embedded` of a user collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct EmbeddedUsers {
    #[serde(rename = "userList")]
    pub user_list: Vec<UserModel>,
}

/// `_links` carrying only `self`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct SelfLinks {
    #[serde(rename = "self")]
    pub self_link: Link,
}

/// Collection envelope; `_embedded` is omitted when there are no users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct UserCollectionModel {
    #[serde(rename = "_embedded", skip_serializing_if = "Option::is_none")]
    pub embedded: Option<EmbeddedUsers>,
    #[serde(rename = "_links")]
    pub links: SelfLinks,
}

/// `_links` of a delete confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct CollectionLinks {
    #[serde(rename = "all-users")]
    pub all_users: Link,
}

/// Delete confirmation pointing back at the collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct DeletedModel {
    pub message: String,
    #[serde(rename = "_links")]
    pub links: CollectionLinks,
}

/// HAL envelopes.
#[derive(Debug, Clone, Copy)]
pub struct Hypermedia;

impl Hypermedia {
    fn model(user: User, links: &Links, with_collection: bool) -> UserModel {
        let self_link = Link::to(links.user(user.id()));
        let all_users = with_collection.then(|| Link::to(links.collection()));
        UserModel {
            user,
            links: UserLinks {
                self_link,
                all_users,
            },
        }
    }
}

impl Representation for Hypermedia {
    const MISSING_IS_ERROR: bool = true;
    const CONTENT_TYPE: &'static str = HAL_JSON;

    type Item = UserModel;
    type Collection = UserCollectionModel;
    type Created = UserModel;
    type Deleted = DeletedModel;

    fn item(user: User, shaping: Shaping<'_>) -> Self::Item {
        Self::model(user, shaping.links, true)
    }

    fn collection(users: Vec<User>, shaping: Shaping<'_>) -> Self::Collection {
        let embedded = (!users.is_empty()).then(|| EmbeddedUsers {
            user_list: users
                .into_iter()
                .map(|user| Self::model(user, shaping.links, false))
                .collect(),
        });
        UserCollectionModel {
            embedded,
            links: SelfLinks {
                self_link: Link::to(shaping.links.collection()),
            },
        }
    }

    fn created(user: User, _: String, shaping: Shaping<'_>) -> Self::Created {
        Self::model(user, shaping.links, true)
    }

    fn deleted(message: String, shaping: Shaping<'_>) -> Self::Deleted {
        DeletedModel {
            message,
            links: CollectionLinks {
                all_users: Link::to(shaping.links.collection()),
            },
        }
    }
}

//! Users API handlers.
//!
//! ```text
//! GET    /v2/users/1
//! GET    /v3/users
//! POST   /users {"id":4,"name":"Amy","dob":"2000-05-01"}
//! DELETE /v1/users/4
//! ```
//!
//! Every handler is generic over a [`Representation`] and is registered once
//! per API version by [`routes`](super::routes).

use actix_web::http::header;
use actix_web::{HttpResponse, HttpResponseBuilder, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::{UserDraft, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::links::Links;
use crate::inbound::http::locale::RequestLocale;
use crate::inbound::http::representation::{Representation, Shaping, VersionedRepresentation};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{rejected_body, rejected_id};

/// Create request body for `POST /users`.
///
/// Fields are optional on the wire so that every missing or invalid one is
/// reported together.
///
/// Example JSON:
/// `{"id":4,"name":"Amy","dob":"2000-05-01"}`
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct CreateUserRequest {
    #[serde(default)]
    #[schema(example = 4)]
    pub id: Option<i64>,
    #[serde(default)]
    #[schema(example = "Amy")]
    pub name: Option<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>, format = Date, example = "2000-05-01")]
    pub dob: Option<NaiveDate>,
}

impl From<CreateUserRequest> for UserDraft {
    fn from(value: CreateUserRequest) -> Self {
        let CreateUserRequest { id, name, dob } = value;
        Self { id, name, dob }
    }
}

fn respond<T: Serialize>(
    mut builder: HttpResponseBuilder,
    content_type: &'static str,
    body: T,
) -> HttpResponse {
    builder.content_type(content_type).json(body)
}

async fn lookup<R: Representation>(
    state: &HttpState,
    raw_id: i64,
    locale: &RequestLocale,
    links: &Links,
    content_type: &'static str,
) -> ApiResult<HttpResponse> {
    let shaping = Shaping {
        today: state.users.today(),
        links,
    };
    if R::MISSING_IS_ERROR {
        let user = state.users.find_existing(raw_id, locale.locale()).await?;
        return Ok(respond(
            HttpResponse::Ok(),
            content_type,
            R::item(user, shaping),
        ));
    }
    match state.users.find(raw_id).await? {
        Some(user) => Ok(respond(
            HttpResponse::Ok(),
            content_type,
            R::item(user, shaping),
        )),
        None => {
            debug!(raw_id, "user absent; answering with an empty body");
            Ok(HttpResponse::Ok().finish())
        }
    }
}

/// Read one user.
///
/// Absent users yield `200` with an empty body unless the representation
/// treats a missing user as `NotFound`.
pub async fn get_user<R: Representation>(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    locale: RequestLocale,
    links: Links,
) -> ApiResult<HttpResponse> {
    lookup::<R>(&state, path.into_inner(), &locale, &links, R::CONTENT_TYPE).await
}

/// Read one user selected by vendor media type; answers with that media type.
pub async fn get_user_by_media_type<R: VersionedRepresentation>(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    locale: RequestLocale,
    links: Links,
) -> ApiResult<HttpResponse> {
    let content_type = R::VERSION.media_type();
    lookup::<R>(&state, path.into_inner(), &locale, &links, content_type).await
}

/// List every stored user.
pub async fn list_users<R: Representation>(
    state: web::Data<HttpState>,
    links: Links,
) -> ApiResult<HttpResponse> {
    let users = state.users.list().await?;
    let shaping = Shaping {
        today: state.users.today(),
        links: &links,
    };
    Ok(respond(
        HttpResponse::Ok(),
        R::CONTENT_TYPE,
        R::collection(users, shaping),
    ))
}

/// Validate and store a user; `201` with a `Location` header.
pub async fn create_user<R: Representation>(
    state: web::Data<HttpState>,
    payload: web::Json<CreateUserRequest>,
    locale: RequestLocale,
    links: Links,
) -> ApiResult<HttpResponse> {
    let today = state.users.today();
    let new_user = UserDraft::from(payload.into_inner())
        .validate(today)
        .map_err(|violations| rejected_body(&violations))?;
    let created = state.users.create(new_user, locale.locale()).await?;

    let location = links.user(created.user.id());
    let shaping = Shaping {
        today,
        links: &links,
    };
    let mut builder = HttpResponse::Created();
    builder.insert_header((header::LOCATION, location));
    Ok(respond(
        builder,
        R::CONTENT_TYPE,
        R::created(created.user, created.message, shaping),
    ))
}

/// Delete one user; non-positive ids are rejected before lookup.
pub async fn delete_user<R: Representation>(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    locale: RequestLocale,
    links: Links,
) -> ApiResult<HttpResponse> {
    let id = UserId::new(path.into_inner()).map_err(|err| rejected_id(&err))?;
    let message = state.users.delete(id, locale.locale()).await?;
    let shaping = Shaping {
        today: state.users.today(),
        links: &links,
    };
    Ok(respond(
        HttpResponse::Ok(),
        R::CONTENT_TYPE,
        R::deleted(message, shaping),
    ))
}

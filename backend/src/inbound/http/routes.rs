//! Route table for the versioned users API.
//!
//! ```text
//! /users/...                          base, same shapes as v1
//! /v1/users/..., /v2/users/...        plain and enriched CRUD
//! /vN/users/param/{id}?version=N      query versioning
//! /vN/users/header/{id}               X-API-VERSION: N
//! /vN/users/accept/{id}               Accept: application/vnd.socialmedia.app-vN+json
//! /v3/users/...                       HAL envelopes
//! ```

use actix_web::{HttpRequest, web};

use crate::domain::Error;
use crate::inbound::http::ApiResult;
use crate::inbound::http::links::RoutePrefix;
use crate::inbound::http::representation::{
    Enriched, Hypermedia, Plain, Representation, VersionedRepresentation,
};
use crate::inbound::http::users::{
    create_user, delete_user, get_user, get_user_by_media_type, list_users,
};
use crate::inbound::http::validation::{json_config, path_config};

/// Prefix of the hypermedia scope.
pub const HYPERMEDIA_PREFIX: &str = "/v3";

/// Register every users route plus the extractor configuration.
///
/// Versioned scopes are registered before the unversioned resources.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use users_api::inbound::http::routes::configure;
///
/// let _app = App::new().configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(path_config())
        .configure(versioned::<Plain>)
        .configure(versioned::<Enriched>)
        .service(
            web::scope(HYPERMEDIA_PREFIX)
                .app_data(RoutePrefix(HYPERMEDIA_PREFIX))
                .configure(crud::<Hypermedia>),
        )
        .configure(crud::<Plain>);
}

fn crud<R: Representation>(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/users")
            .route(web::get().to(list_users::<R>))
            .route(web::post().to(create_user::<R>)),
    )
    .service(
        web::resource("/users/{id}")
            .route(web::get().to(get_user::<R>))
            .route(web::delete().to(delete_user::<R>)),
    );
}

fn versioned<R: VersionedRepresentation>(cfg: &mut web::ServiceConfig) {
    let version = R::VERSION;
    cfg.service(
        web::scope(version.prefix())
            .app_data(RoutePrefix(version.prefix()))
            .service(
                web::resource("/users/param/{id}")
                    .guard(version.query_guard())
                    .route(web::get().to(get_user::<R>)),
            )
            .service(
                web::resource("/users/header/{id}")
                    .guard(version.header_guard())
                    .route(web::get().to(get_user::<R>)),
            )
            .service(
                web::resource("/users/accept/{id}")
                    .guard(version.media_type_guard())
                    .route(web::get().to(get_user_by_media_type::<R>)),
            )
            .configure(crud::<R>),
    );
}

/// Fallback for unmatched routes, rendered through the error translator.
pub async fn not_found(req: HttpRequest) -> ApiResult<actix_web::HttpResponse> {
    Err(Error::not_found(format!(
        "No handler found for {} {}",
        req.method(),
        req.path()
    )))
}

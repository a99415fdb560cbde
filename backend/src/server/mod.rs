//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use mockable::DefaultClock;
use tracing::info;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use users_api::doc::ApiDoc;
use users_api::domain::UserService;
use users_api::domain::ports::{MessageCatalog, UserRepository};
use users_api::inbound::http::health::{HealthState, live, ready};
use users_api::inbound::http::routes::{configure, not_found};
use users_api::inbound::http::state::HttpState;
use users_api::middleware::{ErrorVerbosity, Trace};
use users_api::outbound::messages::StaticMessageCatalog;
use users_api::outbound::persistence::InMemoryUserRepository;

/// Build the user store, seeded unless configuration says otherwise.
///
/// # Errors
/// Returns [`std::io::Error`] if the built-in seed users fail validation.
fn build_repository(config: &ServerConfig) -> std::io::Result<Arc<dyn UserRepository>> {
    if !config.seed_users {
        return Ok(Arc::new(InMemoryUserRepository::new()));
    }
    let repository = InMemoryUserRepository::seeded()
        .map_err(|err| std::io::Error::other(format!("invalid seed user: {err}")))?;
    Ok(Arc::new(repository))
}

fn build_http_state(repository: Arc<dyn UserRepository>) -> HttpState {
    let messages: Arc<dyn MessageCatalog> = Arc::new(StaticMessageCatalog);
    let users = Arc::new(UserService::new(
        repository,
        messages.clone(),
        Arc::new(DefaultClock),
    ));
    HttpState::new(users, messages)
}

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    verbosity: ErrorVerbosity,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        verbosity,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace::new(verbosity))
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app.configure(configure)
        .default_service(web::to(not_found))
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Parameters
/// - `health_state`: shared readiness state updated once the server is initialised.
/// - `config`: binding address, error verbosity and seeding choice.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when seeding the store, binding the socket
/// or starting the server fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = web::Data::new(build_http_state(build_repository(&config)?));
    let ServerConfig {
        bind_addr,
        verbosity,
        seed_users,
    } = config;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            verbosity,
        })
    })
    .bind(bind_addr)?
    .run();

    info!(%bind_addr, ?verbosity, seed_users, "users API listening");
    health_state.mark_ready();
    Ok(server)
}

//! Test helpers for inbound HTTP components.

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};

use crate::inbound::http::routes::{configure, not_found};
use crate::inbound::http::state::HttpState;
use crate::middleware::trace::{ErrorVerbosity, Trace};

/// Build the users API over `state` with the trace middleware installed.
pub fn test_app(
    state: HttpState,
    verbosity: ErrorVerbosity,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .wrap(Trace::new(verbosity))
        .configure(configure)
        .default_service(web::to(not_found))
}

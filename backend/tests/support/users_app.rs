//! Shared app construction for users API integration tests.

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::http::header::HeaderMap;
use actix_web::test::{self, TestRequest};
use actix_web::web::{self, Bytes};
use actix_web::App;
use serde_json::Value;
use users_api::Trace;
use users_api::inbound::http::routes::{configure, not_found};
use users_api::inbound::http::state::HttpState;
use users_api::middleware::ErrorVerbosity;

/// Start the users API over `state` rendering errors at `verbosity`.
pub async fn init_app(
    state: HttpState,
    verbosity: ErrorVerbosity,
) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error> {
    test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .wrap(Trace::new(verbosity))
            .configure(configure)
            .default_service(web::to(not_found)),
    )
    .await
}

/// Status, headers and body of a completed call.
#[derive(Debug)]
pub struct Reply {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl Reply {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("response body is JSON")
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }
}

/// Send `request` to `app` and collect the reply.
pub async fn send<S>(app: &S, request: TestRequest) -> Reply
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    let response = test::call_service(app, request.to_request()).await;
    let status = response.status();
    let headers = response.headers().clone();
    let body = test::read_body(response).await;
    Reply {
        status,
        headers,
        body,
    }
}

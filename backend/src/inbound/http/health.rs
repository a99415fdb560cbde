//! Readiness and liveness probes.
//!
//! The server moves through three phases: `starting` until the listener is
//! bound, `serving` while it accepts traffic and `draining` once it has
//! stopped. Readiness holds only while serving; liveness fails once draining.
//! Probe responses report the phase and are never cached.

use std::sync::atomic::{AtomicU8, Ordering};

use actix_web::{HttpResponse, get, http::header, web};
use serde::Serialize;
use tracing::debug;
use utoipa::ToSchema;

/// Lifecycle phase reported by the probes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ServerPhase {
    Starting,
    Serving,
    Draining,
}

impl ServerPhase {
    const fn encode(self) -> u8 {
        match self {
            Self::Starting => 0,
            Self::Serving => 1,
            Self::Draining => 2,
        }
    }

    const fn decode(raw: u8) -> Self {
        match raw {
            0 => Self::Starting,
            1 => Self::Serving,
            _ => Self::Draining,
        }
    }
}

/// Probe body, e.g. `{"phase":"serving"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct ProbeReport {
    pub phase: ServerPhase,
}

/// Phase shared between the server bootstrap and the probe handlers.
#[derive(Debug)]
pub struct HealthState {
    phase: AtomicU8,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            phase: AtomicU8::new(ServerPhase::Starting.encode()),
        }
    }
}

impl HealthState {
    /// State in the `starting` phase.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter `serving` once the listener is bound; only leaves `starting`.
    pub fn mark_ready(&self) {
        let entered = self.phase.compare_exchange(
            ServerPhase::Starting.encode(),
            ServerPhase::Serving.encode(),
            Ordering::AcqRel,
            Ordering::Acquire,
        );
        if let Err(current) = entered {
            debug!(phase = ?ServerPhase::decode(current), "ignoring late readiness");
        }
    }

    /// Enter `draining`; the phase never leaves it.
    pub fn mark_unhealthy(&self) {
        self.phase
            .store(ServerPhase::Draining.encode(), Ordering::Release);
    }

    /// Current phase.
    pub fn phase(&self) -> ServerPhase {
        ServerPhase::decode(self.phase.load(Ordering::Acquire))
    }
}

fn report(phase: ServerPhase, healthy: bool) -> HttpResponse {
    let mut builder = if healthy {
        HttpResponse::Ok()
    } else {
        HttpResponse::ServiceUnavailable()
    };
    builder
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .json(ProbeReport { phase })
}

/// Readiness probe: `200` while serving, `503` otherwise.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    responses(
        (status = 200, description = "Accepting traffic", body = ProbeReport),
        (status = 503, description = "Starting or draining", body = ProbeReport)
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    let phase = state.phase();
    report(phase, phase == ServerPhase::Serving)
}

/// Liveness probe: `200` until draining.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    responses(
        (status = 200, description = "Starting or serving", body = ProbeReport),
        (status = 503, description = "Draining", body = ProbeReport)
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    let phase = state.phase();
    report(phase, phase != ServerPhase::Draining)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::App;
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::{Value, json};

    fn state_in(phase: ServerPhase) -> web::Data<HealthState> {
        let state = web::Data::new(HealthState::new());
        match phase {
            ServerPhase::Starting => {}
            ServerPhase::Serving => state.mark_ready(),
            ServerPhase::Draining => {
                state.mark_ready();
                state.mark_unhealthy();
            }
        }
        state
    }

    #[rstest]
    #[case(ServerPhase::Starting, "/health/ready", StatusCode::SERVICE_UNAVAILABLE)]
    #[case(ServerPhase::Serving, "/health/ready", StatusCode::OK)]
    #[case(ServerPhase::Draining, "/health/ready", StatusCode::SERVICE_UNAVAILABLE)]
    #[case(ServerPhase::Starting, "/health/live", StatusCode::OK)]
    #[case(ServerPhase::Serving, "/health/live", StatusCode::OK)]
    #[case(ServerPhase::Draining, "/health/live", StatusCode::SERVICE_UNAVAILABLE)]
    #[actix_web::test]
    async fn probes_follow_the_phase(
        #[case] phase: ServerPhase,
        #[case] uri: &str,
        #[case] expected: StatusCode,
    ) {
        let app = actix_test::init_service(
            App::new()
                .app_data(state_in(phase))
                .service(ready)
                .service(live),
        )
        .await;
        let response =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request())
                .await;

        assert_eq!(response.status(), expected);
        assert_eq!(
            response
                .headers()
                .get(header::CACHE_CONTROL)
                .and_then(|value| value.to_str().ok()),
            Some("no-store")
        );
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body, json!({ "phase": phase }));
    }

    #[rstest]
    fn draining_is_terminal() {
        let state = HealthState::new();
        assert_eq!(state.phase(), ServerPhase::Starting);
        state.mark_ready();
        assert_eq!(state.phase(), ServerPhase::Serving);
        state.mark_unhealthy();
        state.mark_ready();
        assert_eq!(state.phase(), ServerPhase::Draining);
    }
}

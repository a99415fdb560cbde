//! Test utilities for the users API crate.
//!
//! Shared by unit tests (in `src/`) and integration tests (in `tests/`).
//! Compiled for `cfg(test)` and behind the `test-support` feature.

use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use mockable::Clock;

use crate::domain::UserService;
use crate::domain::ports::{MessageCatalog, UserRepository};
use crate::inbound::http::state::HttpState;
use crate::outbound::messages::StaticMessageCatalog;
use crate::outbound::persistence::InMemoryUserRepository;

/// Clock frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    /// Freeze the clock at noon UTC on `date`.
    ///
    /// # Panics
    /// Panics if noon cannot be represented for `date`, which chrono only
    /// reports for out-of-range dates.
    pub fn on(date: NaiveDate) -> Self {
        let noon = date
            .and_hms_opt(12, 0, 0)
            .unwrap_or_else(|| panic!("noon must exist on {date}"));
        Self(Utc.from_utc_datetime(&noon))
    }

    /// Freeze the clock at `year-month-day`.
    ///
    /// # Panics
    /// Panics when the date is invalid.
    pub fn ymd(year: i32, month: u32, day: u32) -> Self {
        let date = NaiveDate::from_ymd_opt(year, month, day)
            .unwrap_or_else(|| panic!("invalid fixture date {year}-{month}-{day}"));
        Self::on(date)
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Date every fixture clock is frozen at unless a test says otherwise.
pub fn fixture_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 15).unwrap_or_default()
}

/// Service over `repository` with the built-in catalogue and a frozen clock.
pub fn service_with(repository: Arc<dyn UserRepository>, clock: FixedClock) -> Arc<UserService> {
    Arc::new(UserService::new(
        repository,
        Arc::new(StaticMessageCatalog),
        Arc::new(clock),
    ))
}

/// HTTP state backed by the seeded in-memory store and a frozen clock.
///
/// # Panics
/// Panics if the built-in seed users fail validation.
pub fn seeded_http_state() -> HttpState {
    let repository = InMemoryUserRepository::seeded()
        .unwrap_or_else(|err| panic!("seed users must be valid: {err}"));
    http_state_with(Arc::new(repository))
}

/// HTTP state backed by `repository` and a frozen clock.
pub fn http_state_with(repository: Arc<dyn UserRepository>) -> HttpState {
    let messages: Arc<dyn MessageCatalog> = Arc::new(StaticMessageCatalog);
    let users = Arc::new(UserService::new(
        repository,
        messages.clone(),
        Arc::new(FixedClock::on(fixture_today())),
    ));
    HttpState::new(users, messages)
}

//! Server settings loaded via OrthoConfig.
//!
//! Values layer CLI flags over `USERS_API_*` environment variables over an
//! optional configuration file.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::{Deserialize, Deserializer};

use crate::middleware::trace::ErrorVerbosity;

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DEFAULT_PORT: u16 = 8080;
const DEV_PROFILE: &str = "dev";

/// Configuration values controlling the HTTP server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "USERS_API")]
pub struct ServerSettings {
    /// Comma separated active profiles, e.g. `dev` or `local,dev`.
    #[serde(default, deserialize_with = "profile_list")]
    pub profiles: Option<String>,
    /// Address to bind; defaults to all interfaces.
    pub host: Option<IpAddr>,
    /// Port to bind; defaults to 8080.
    pub port: Option<u16>,
    /// Start with an empty store instead of the sample users.
    #[ortho_config(default = false)]
    pub skip_seed: bool,
}

impl ServerSettings {
    /// Socket address the server binds to.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(
            self.host.unwrap_or(DEFAULT_HOST),
            self.port.unwrap_or(DEFAULT_PORT),
        )
    }

    /// Parsed active profiles.
    pub fn active_profiles(&self) -> ActiveProfiles {
        ActiveProfiles::parse(self.profiles.as_deref().unwrap_or_default())
    }
}

/// Accept profiles as one string or as the list the environment layer
/// produces for comma separated values.
fn profile_list<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Profiles {
        One(String),
        Many(Vec<String>),
    }

    Ok(
        Option::<Profiles>::deserialize(deserializer)?.map(|profiles| match profiles {
            Profiles::One(raw) => raw,
            Profiles::Many(names) => names.join(","),
        }),
    )
}

/// Active runtime profiles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveProfiles(Vec<String>);

impl ActiveProfiles {
    /// Parse a comma separated list, ignoring blanks and case.
    ///
    /// # Examples
    /// ```
    /// use users_api::settings::ActiveProfiles;
    ///
    /// assert!(ActiveProfiles::parse("local, DEV").is_dev());
    /// assert!(!ActiveProfiles::parse("prod").is_dev());
    /// ```
    pub fn parse(raw: &str) -> Self {
        Self(
            raw.split(',')
                .map(|profile| profile.trim().to_ascii_lowercase())
                .filter(|profile| !profile.is_empty())
                .collect(),
        )
    }

    /// Whether the `dev` profile is active.
    pub fn is_dev(&self) -> bool {
        self.0.iter().any(|profile| profile == DEV_PROFILE)
    }

    /// Error verbosity implied by the profiles.
    pub fn error_verbosity(&self) -> ErrorVerbosity {
        if self.is_dev() {
            ErrorVerbosity::Verbose
        } else {
            ErrorVerbosity::Terse
        }
    }

    /// Normalised profile names in declaration order.
    pub fn names(&self) -> &[String] {
        &self.0
    }
}

//! Application state management.
//!
//! This module defines the shared state that is passed to all request
//! handlers.

use std::sync::Arc;
use std::time::Duration;

use rp_saml::converter::Saml2AuthenticationTokenConverter;
use rp_saml::registration::{
    AssertingPartyDetails, InMemoryRelyingPartyRegistrationRepository, PathRegistrationResolver,
    RelyingPartyRegistration,
};
use rp_saml::repository::InMemoryAuthenticationRequestRepository;

use crate::config::ServerConfig;

/// Converter type wired with the in-memory collaborators.
pub type AcsConverter = Saml2AuthenticationTokenConverter<
    PathRegistrationResolver,
    InMemoryAuthenticationRequestRepository,
>;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: ServerConfig,

    /// Registration lookup.
    pub registrations: Arc<InMemoryRelyingPartyRegistrationRepository>,

    /// In-flight authentication request store.
    pub requests: Arc<InMemoryAuthenticationRequestRepository>,

    /// Inbound response converter.
    pub converter: Arc<AcsConverter>,
}

impl AppState {
    /// Creates the application state from configuration.
    #[must_use]
    pub fn new(config: ServerConfig) -> Self {
        let registration = RelyingPartyRegistration::new(
            config.registration_id.as_str(),
            config.sp_entity_id.as_str(),
            format!(
                "{}/login/saml2/sso/{}",
                config.base_url, config.registration_id
            ),
            AssertingPartyDetails::new(
                config.idp_entity_id.as_str(),
                config.idp_sso_url.as_str(),
            ),
        );

        let registrations = Arc::new(InMemoryRelyingPartyRegistrationRepository::new([
            registration,
        ]));
        let requests = Arc::new(InMemoryAuthenticationRequestRepository::with_max_age(
            Duration::from_secs(config.authn_request_lifespan),
        ));
        let converter = Arc::new(
            Saml2AuthenticationTokenConverter::new(
                Arc::new(PathRegistrationResolver::new(registrations.clone())),
                requests.clone(),
            )
            .with_max_inflated_len(config.max_inflated_len),
        );

        Self {
            config,
            registrations,
            requests,
            converter,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_wires_the_configured_registration() {
        let state = AppState::new(ServerConfig::for_testing());

        let registration = state
            .registrations
            .find_by_registration_id("default")
            .unwrap();
        assert_eq!(
            registration.acs_url(),
            "http://localhost:8080/login/saml2/sso/default"
        );
        assert_eq!(
            registration.asserting_party().sso_url,
            "https://idp.example.com/sso"
        );
    }
}

//! Relying-party registration model.
//!
//! A registration captures how one tenant of this service provider
//! participates in SAML authentication: its own identity, where responses
//! are received, and the asserting party it trusts.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::bindings::Saml2Binding;
use crate::web::SamlWebRequest;

/// Asserting-party (identity provider) details for a registration.
#[derive(Debug, Clone)]
pub struct AssertingPartyDetails {
    /// Entity ID of the asserting party.
    pub entity_id: String,
    /// Single Sign-On service URL outbound requests are sent to.
    pub sso_url: String,
    /// Binding used for outbound authentication requests.
    pub sso_binding: Saml2Binding,
}

impl AssertingPartyDetails {
    /// Creates asserting-party details with the redirect SSO binding.
    #[must_use]
    pub fn new(entity_id: impl Into<String>, sso_url: impl Into<String>) -> Self {
        Self {
            entity_id: entity_id.into(),
            sso_url: sso_url.into(),
            sso_binding: Saml2Binding::Redirect,
        }
    }

    /// Overrides the binding used for outbound requests.
    #[must_use]
    pub fn with_sso_binding(mut self, binding: Saml2Binding) -> Self {
        self.sso_binding = binding;
        self
    }
}

/// Per-tenant SAML service-provider configuration.
///
/// Immutable once constructed and shared across requests behind an [`Arc`].
#[derive(Debug, Clone)]
pub struct RelyingPartyRegistration {
    registration_id: String,
    entity_id: String,
    acs_url: String,
    acs_binding: Saml2Binding,
    asserting_party: AssertingPartyDetails,
}

impl RelyingPartyRegistration {
    /// Creates a registration with the POST ACS binding.
    #[must_use]
    pub fn new(
        registration_id: impl Into<String>,
        entity_id: impl Into<String>,
        acs_url: impl Into<String>,
        asserting_party: AssertingPartyDetails,
    ) -> Self {
        Self {
            registration_id: registration_id.into(),
            entity_id: entity_id.into(),
            acs_url: acs_url.into(),
            acs_binding: Saml2Binding::Post,
            asserting_party,
        }
    }

    /// Overrides the binding of the assertion consumer service.
    #[must_use]
    pub fn with_acs_binding(mut self, binding: Saml2Binding) -> Self {
        self.acs_binding = binding;
        self
    }

    /// Returns the identifier this registration is looked up by.
    #[must_use]
    pub fn registration_id(&self) -> &str {
        &self.registration_id
    }

    /// Returns the entity ID of this service provider.
    #[must_use]
    pub fn entity_id(&self) -> &str {
        &self.entity_id
    }

    /// Returns the assertion consumer service URL.
    #[must_use]
    pub fn acs_url(&self) -> &str {
        &self.acs_url
    }

    /// Returns the assertion consumer service binding.
    #[must_use]
    pub const fn acs_binding(&self) -> Saml2Binding {
        self.acs_binding
    }

    /// Returns the asserting-party details.
    #[must_use]
    pub const fn asserting_party(&self) -> &AssertingPartyDetails {
        &self.asserting_party
    }
}

/// In-memory registration store, looked up by registration id.
#[derive(Debug, Default)]
pub struct InMemoryRelyingPartyRegistrationRepository {
    registrations: HashMap<String, Arc<RelyingPartyRegistration>>,
}

impl InMemoryRelyingPartyRegistrationRepository {
    /// Creates a repository holding the given registrations.
    #[must_use]
    pub fn new(registrations: impl IntoIterator<Item = RelyingPartyRegistration>) -> Self {
        Self {
            registrations: registrations
                .into_iter()
                .map(|registration| {
                    (
                        registration.registration_id().to_string(),
                        Arc::new(registration),
                    )
                })
                .collect(),
        }
    }

    /// Finds a registration by its registration id.
    #[must_use]
    pub fn find_by_registration_id(
        &self,
        registration_id: &str,
    ) -> Option<Arc<RelyingPartyRegistration>> {
        self.registrations.get(registration_id).cloned()
    }
}

/// Resolves the registration governing an inbound request.
///
/// Returning `None` signals that no tenant claims the request; the
/// conversion then yields no token so another mechanism may handle it.
#[async_trait]
pub trait RelyingPartyRegistrationResolver: Send + Sync {
    /// Resolves the registration for `request`, or `None` when none matches.
    async fn resolve(&self, request: &SamlWebRequest) -> Option<Arc<RelyingPartyRegistration>>;
}

/// Resolver matching the registration id carried in the request path
/// against an in-memory repository.
#[derive(Debug)]
pub struct PathRegistrationResolver {
    repository: Arc<InMemoryRelyingPartyRegistrationRepository>,
}

impl PathRegistrationResolver {
    /// Creates a resolver over `repository`.
    #[must_use]
    pub fn new(repository: Arc<InMemoryRelyingPartyRegistrationRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl RelyingPartyRegistrationResolver for PathRegistrationResolver {
    async fn resolve(&self, request: &SamlWebRequest) -> Option<Arc<RelyingPartyRegistration>> {
        let registration_id = request.registration_id()?;
        self.repository.find_by_registration_id(registration_id)
    }
}

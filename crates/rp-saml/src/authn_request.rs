//! Outbound authentication requests.
//!
//! Covers issuing an `AuthnRequest` to the asserting party and the record
//! kept so the eventual response can be correlated back to it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::bindings::Saml2Binding;
use crate::registration::RelyingPartyRegistration;

/// Record of an issued authentication request.
///
/// Stored when the request is sent and consumed at most once when the
/// matching response arrives. Carries no trust assertion of its own;
/// downstream validation decides what to make of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Saml2AuthenticationRequest {
    /// Unique `ID` attribute of the issued request.
    pub id: String,
    /// Registration the request was issued under.
    pub registration_id: String,
    /// Relay state sent along with the request.
    pub relay_state: Option<String>,
    /// Binding the request was sent over.
    pub binding: Saml2Binding,
    /// When the request was issued.
    pub created_at: DateTime<Utc>,
}

impl Saml2AuthenticationRequest {
    /// Returns the record age in seconds.
    #[must_use]
    pub fn age_seconds(&self) -> i64 {
        (Utc::now() - self.created_at).num_seconds()
    }
}

/// A freshly issued authentication request: the XML to transmit plus the
/// record to store until the response arrives.
#[derive(Debug)]
pub struct IssuedAuthnRequest {
    /// Serialized `AuthnRequest` document.
    pub xml: String,
    /// Correlation record to persist.
    pub record: Saml2AuthenticationRequest,
}

/// Issues a new authentication request under `registration`.
///
/// The generated `ID` is an NCName (`_` followed by a UUID); `relay_state`
/// is echoed back verbatim by the asserting party.
#[must_use]
pub fn issue_authn_request(
    registration: &RelyingPartyRegistration,
    relay_state: Option<String>,
) -> IssuedAuthnRequest {
    let id = format!("_{}", Uuid::new_v4());
    let issue_instant = Utc::now();

    let xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<samlp:AuthnRequest xmlns:samlp="urn:oasis:names:tc:SAML:2.0:protocol" ID="{id}" Version="2.0" IssueInstant="{instant}" Destination="{destination}" AssertionConsumerServiceURL="{acs_url}" ProtocolBinding="{acs_binding}">
<saml:Issuer xmlns:saml="urn:oasis:names:tc:SAML:2.0:assertion">{issuer}</saml:Issuer>
</samlp:AuthnRequest>"#,
        instant = issue_instant.format("%Y-%m-%dT%H:%M:%SZ"),
        destination = registration.asserting_party().sso_url,
        acs_url = registration.acs_url(),
        acs_binding = registration.acs_binding().uri(),
        issuer = registration.entity_id(),
    );

    IssuedAuthnRequest {
        xml,
        record: Saml2AuthenticationRequest {
            id,
            registration_id: registration.registration_id().to_string(),
            relay_state,
            binding: registration.asserting_party().sso_binding,
            created_at: issue_instant,
        },
    }
}

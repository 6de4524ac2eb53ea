//! Conversion of inbound authentication responses into tokens.
//!
//! This is the trust-boundary step: it consumes attacker-influenced HTTP
//! parameters, decodes untrusted bytes, and correlates the in-flight
//! authentication request, all before any cryptographic validation of the
//! message happens downstream.

use std::sync::Arc;

use crate::bindings::{self, Saml2Binding, DEFAULT_MAX_INFLATED_LEN};
use crate::error::Saml2Result;
use crate::registration::RelyingPartyRegistrationResolver;
use crate::repository::Saml2AuthenticationRequestRepository;
use crate::token::Saml2AuthenticationToken;
use crate::web::SamlWebRequest;

/// Converts an inbound HTTP authentication response into a
/// [`Saml2AuthenticationToken`].
///
/// The conversion yields:
///
/// - `Ok(None)` when no registration matches the request or the
///   `SAMLResponse` parameter is absent, so another mechanism may claim the
///   request;
/// - `Ok(Some(token))` when the parameter decodes under the binding the
///   request method selects;
/// - `Err(_)` when the payload is rejected. Failures are terminal for the
///   attempt, with the cause retained for logging only.
pub struct Saml2AuthenticationTokenConverter<R, S> {
    registrations: Arc<R>,
    requests: Arc<S>,
    max_inflated_len: usize,
}

impl<R, S> Saml2AuthenticationTokenConverter<R, S>
where
    R: RelyingPartyRegistrationResolver,
    S: Saml2AuthenticationRequestRepository,
{
    /// Creates a converter over the given resolver and request store.
    pub fn new(registrations: Arc<R>, requests: Arc<S>) -> Self {
        Self {
            registrations,
            requests,
            max_inflated_len: DEFAULT_MAX_INFLATED_LEN,
        }
    }

    /// Overrides the inflated-size bound applied to redirect-binding
    /// payloads.
    #[must_use]
    pub fn with_max_inflated_len(mut self, max_inflated_len: usize) -> Self {
        self.max_inflated_len = max_inflated_len;
        self
    }

    /// Converts `request` into an authentication token.
    pub async fn convert(
        &self,
        request: &SamlWebRequest,
    ) -> Saml2Result<Option<Saml2AuthenticationToken>> {
        let Some(registration) = self.registrations.resolve(request).await else {
            tracing::debug!("no relying-party registration matches the request");
            return Ok(None);
        };
        let Some(saml_response) = request.saml_response() else {
            tracing::debug!(
                registration_id = registration.registration_id(),
                "request carries no SAMLResponse parameter"
            );
            return Ok(None);
        };

        let decoded = bindings::saml_decode(saml_response)?;
        let response_xml = self.inflate_if_required(request, &decoded)?;
        let authentication_request = self.requests.take_authentication_request(request).await;

        Ok(Some(Saml2AuthenticationToken::new(
            registration,
            response_xml,
            authentication_request,
        )))
    }

    /// Turns decoded bytes into the message text per the request's binding.
    fn inflate_if_required(&self, request: &SamlWebRequest, decoded: &[u8]) -> Saml2Result<String> {
        match Saml2Binding::from_method(request.method()) {
            Saml2Binding::Redirect => bindings::saml_inflate(decoded, self.max_inflated_len),
            Saml2Binding::Post => Ok(String::from_utf8_lossy(decoded).into_owned()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bindings::{saml_deflate, saml_encode};
    use crate::error::Saml2Error;
    use crate::registration::{
        AssertingPartyDetails, InMemoryRelyingPartyRegistrationRepository,
        PathRegistrationResolver, RelyingPartyRegistration,
    };
    use crate::repository::InMemoryAuthenticationRequestRepository;
    use crate::authn_request::Saml2AuthenticationRequest;
    use chrono::Utc;
    use http::Method;

    struct Fixture {
        converter: Saml2AuthenticationTokenConverter<
            PathRegistrationResolver,
            InMemoryAuthenticationRequestRepository,
        >,
        requests: Arc<InMemoryAuthenticationRequestRepository>,
    }

    fn fixture() -> Fixture {
        let registrations = Arc::new(InMemoryRelyingPartyRegistrationRepository::new([
            RelyingPartyRegistration::new(
                "sp1",
                "https://rp.example.com",
                "https://rp.example.com/login/saml2/sso/sp1",
                AssertingPartyDetails::new(
                    "https://idp.example.com",
                    "https://idp.example.com/sso",
                ),
            ),
        ]));
        let requests = Arc::new(InMemoryAuthenticationRequestRepository::new());
        Fixture {
            converter: Saml2AuthenticationTokenConverter::new(
                Arc::new(PathRegistrationResolver::new(registrations)),
                requests.clone(),
            ),
            requests,
        }
    }

    fn redirect_payload(message: &str) -> String {
        saml_encode(&saml_deflate(message.as_bytes()).unwrap())
    }

    #[tokio::test]
    async fn missing_parameter_yields_no_token() {
        let fixture = fixture();
        let request = SamlWebRequest::new(Method::GET).with_registration_id("sp1");
        assert!(fixture.converter.convert(&request).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn unknown_registration_yields_no_token_without_decoding() {
        let fixture = fixture();
        // The payload is not even base64; conversion must not reach the
        // decoder when the registration is unresolved.
        let request = SamlWebRequest::new(Method::POST)
            .with_registration_id("unknown")
            .with_saml_response(Some("!!!not base64!!!".to_string()));
        assert!(fixture.converter.convert(&request).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn redirect_binding_inflates_the_message() {
        let fixture = fixture();
        let request = SamlWebRequest::new(Method::GET)
            .with_registration_id("sp1")
            .with_saml_response(Some(redirect_payload("hello")));

        let token = fixture.converter.convert(&request).await.unwrap().unwrap();
        assert_eq!(token.registration().registration_id(), "sp1");
        assert_eq!(token.saml2_response(), "hello");
        assert!(token.authentication_request().is_none());
    }

    #[tokio::test]
    async fn post_binding_passes_text_through() {
        let fixture = fixture();
        let message = r#"<samlp:Response ID="_r1">unchanged</samlp:Response>"#;
        let request = SamlWebRequest::new(Method::POST)
            .with_registration_id("sp1")
            .with_saml_response(Some(saml_encode(message.as_bytes())));

        let token = fixture.converter.convert(&request).await.unwrap().unwrap();
        assert_eq!(token.saml2_response(), message);
    }

    #[tokio::test]
    async fn malformed_base64_is_rejected_on_either_binding() {
        let fixture = fixture();
        for method in [Method::GET, Method::POST] {
            let request = SamlWebRequest::new(method)
                .with_registration_id("sp1")
                .with_saml_response(Some("QQ=".to_string()));
            let err = fixture.converter.convert(&request).await.unwrap_err();
            assert!(matches!(err, Saml2Error::InvalidEncoding(_)));
        }
    }

    #[tokio::test]
    async fn valid_base64_with_invalid_deflate_is_rejected_on_get() {
        let fixture = fixture();
        let request = SamlWebRequest::new(Method::GET)
            .with_registration_id("sp1")
            .with_saml_response(Some(saml_encode(b"this is not a deflate stream")));

        let err = fixture.converter.convert(&request).await.unwrap_err();
        assert!(matches!(err, Saml2Error::InvalidCompression(_)));
    }

    #[tokio::test]
    async fn correlated_request_is_attached_to_the_token() {
        let fixture = fixture();
        let stored = Saml2AuthenticationRequest {
            id: "_req1".to_string(),
            registration_id: "sp1".to_string(),
            relay_state: Some("state".to_string()),
            binding: Saml2Binding::Redirect,
            created_at: Utc::now(),
        };
        fixture
            .requests
            .save_authentication_request("session-1", stored.clone())
            .await;

        let request = SamlWebRequest::new(Method::POST)
            .with_registration_id("sp1")
            .with_saml_response(Some(saml_encode(b"<samlp:Response/>")))
            .with_session_id(Some("session-1".to_string()));

        let token = fixture.converter.convert(&request).await.unwrap().unwrap();
        assert_eq!(token.authentication_request(), Some(&stored));
    }

    #[tokio::test]
    async fn conversion_succeeds_without_a_correlated_request() {
        let fixture = fixture();
        let request = SamlWebRequest::new(Method::POST)
            .with_registration_id("sp1")
            .with_saml_response(Some(saml_encode(b"<samlp:Response/>")))
            .with_session_id(Some("never-seen".to_string()));

        let token = fixture.converter.convert(&request).await.unwrap().unwrap();
        assert!(token.authentication_request().is_none());
    }

    #[tokio::test]
    async fn oversized_redirect_payload_is_rejected() {
        let fixture = fixture();
        let registrations = Arc::new(InMemoryRelyingPartyRegistrationRepository::new([
            RelyingPartyRegistration::new(
                "sp1",
                "https://rp.example.com",
                "https://rp.example.com/login/saml2/sso/sp1",
                AssertingPartyDetails::new(
                    "https://idp.example.com",
                    "https://idp.example.com/sso",
                ),
            ),
        ]));
        let bounded = Saml2AuthenticationTokenConverter::new(
            Arc::new(PathRegistrationResolver::new(registrations)),
            fixture.requests.clone(),
        )
        .with_max_inflated_len(16);

        let request = SamlWebRequest::new(Method::GET)
            .with_registration_id("sp1")
            .with_saml_response(Some(redirect_payload(&"x".repeat(1000))));

        let err = bounded.convert(&request).await.unwrap_err();
        assert!(matches!(err, Saml2Error::InvalidCompression(_)));
    }
}

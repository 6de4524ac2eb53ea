//! The authentication token produced by the response conversion.

use std::sync::Arc;

use crate::authn_request::Saml2AuthenticationRequest;
use crate::registration::RelyingPartyRegistration;

/// An unauthenticated SAML 2.0 response, bundled with its context.
///
/// The response inside has not been parsed, signature-checked, or validated;
/// this type only fixes what arrived, under which registration, and which
/// outbound request (if any) it answers. Downstream processing performs the
/// actual verification.
#[derive(Debug, Clone)]
pub struct Saml2AuthenticationToken {
    registration: Arc<RelyingPartyRegistration>,
    saml2_response: String,
    authentication_request: Option<Saml2AuthenticationRequest>,
}

impl Saml2AuthenticationToken {
    /// Creates a token for a decoded response.
    #[must_use]
    pub fn new(
        registration: Arc<RelyingPartyRegistration>,
        saml2_response: String,
        authentication_request: Option<Saml2AuthenticationRequest>,
    ) -> Self {
        Self {
            registration,
            saml2_response,
            authentication_request,
        }
    }

    /// Returns the registration the response was received under.
    #[must_use]
    pub fn registration(&self) -> &RelyingPartyRegistration {
        &self.registration
    }

    /// Returns the decoded response document.
    #[must_use]
    pub fn saml2_response(&self) -> &str {
        &self.saml2_response
    }

    /// Returns the correlated outbound request, when one was stored.
    #[must_use]
    pub fn authentication_request(&self) -> Option<&Saml2AuthenticationRequest> {
        self.authentication_request.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registration::AssertingPartyDetails;

    #[test]
    fn token_exposes_its_parts() {
        let registration = Arc::new(RelyingPartyRegistration::new(
            "sp1",
            "https://rp.example.com",
            "https://rp.example.com/login/saml2/sso/sp1",
            AssertingPartyDetails::new("https://idp.example.com", "https://idp.example.com/sso"),
        ));
        let token =
            Saml2AuthenticationToken::new(registration, "<samlp:Response/>".to_string(), None);

        assert_eq!(token.registration().registration_id(), "sp1");
        assert_eq!(token.saml2_response(), "<samlp:Response/>");
        assert!(token.authentication_request().is_none());
    }
}

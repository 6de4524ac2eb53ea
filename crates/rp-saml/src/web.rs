//! HTTP request view consumed by the SAML web layer.

use http::Method;

/// The slice of an inbound HTTP request the SAML web layer operates on.
///
/// Handlers assemble this view from the transport (method, path, query or
/// form parameters, session cookie), so resolution, correlation, and
/// conversion stay independent of the HTTP framework. The message parameter
/// is held exactly as received, still encoded.
#[derive(Debug, Clone)]
pub struct SamlWebRequest {
    method: Method,
    registration_id: Option<String>,
    saml_response: Option<String>,
    relay_state: Option<String>,
    session_id: Option<String>,
}

impl SamlWebRequest {
    /// Creates a view of a request received with `method`.
    #[must_use]
    pub fn new(method: Method) -> Self {
        Self {
            method,
            registration_id: None,
            saml_response: None,
            relay_state: None,
            session_id: None,
        }
    }

    /// Sets the registration id extracted from the request path.
    #[must_use]
    pub fn with_registration_id(mut self, registration_id: impl Into<String>) -> Self {
        self.registration_id = Some(registration_id.into());
        self
    }

    /// Sets the `SAMLResponse` parameter, when the request carried one.
    #[must_use]
    pub fn with_saml_response(mut self, saml_response: Option<String>) -> Self {
        self.saml_response = saml_response;
        self
    }

    /// Sets the `RelayState` parameter, when the request carried one.
    #[must_use]
    pub fn with_relay_state(mut self, relay_state: Option<String>) -> Self {
        self.relay_state = relay_state;
        self
    }

    /// Sets the opaque session identifier the browser presented.
    #[must_use]
    pub fn with_session_id(mut self, session_id: Option<String>) -> Self {
        self.session_id = session_id;
        self
    }

    /// Returns the HTTP method of the request.
    #[must_use]
    pub const fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the registration id from the request path, if any.
    #[must_use]
    pub fn registration_id(&self) -> Option<&str> {
        self.registration_id.as_deref()
    }

    /// Returns the still-encoded `SAMLResponse` parameter, if present.
    #[must_use]
    pub fn saml_response(&self) -> Option<&str> {
        self.saml_response.as_deref()
    }

    /// Returns the `RelayState` parameter, if present.
    #[must_use]
    pub fn relay_state(&self) -> Option<&str> {
        self.relay_state.as_deref()
    }

    /// Returns the session identifier, if the browser presented one.
    #[must_use]
    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_fills_the_view() {
        let request = SamlWebRequest::new(Method::POST)
            .with_registration_id("sp1")
            .with_saml_response(Some("Zm9v".to_string()))
            .with_relay_state(Some("state".to_string()))
            .with_session_id(Some("session-1".to_string()));

        assert_eq!(request.method(), &Method::POST);
        assert_eq!(request.registration_id(), Some("sp1"));
        assert_eq!(request.saml_response(), Some("Zm9v"));
        assert_eq!(request.relay_state(), Some("state"));
        assert_eq!(request.session_id(), Some("session-1"));
    }

    #[test]
    fn optional_fields_default_to_absent() {
        let request = SamlWebRequest::new(Method::GET);
        assert!(request.registration_id().is_none());
        assert!(request.saml_response().is_none());
        assert!(request.relay_state().is_none());
        assert!(request.session_id().is_none());
    }
}

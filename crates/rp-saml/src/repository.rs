//! Storage of in-flight authentication requests.

use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;

use crate::authn_request::Saml2AuthenticationRequest;
use crate::web::SamlWebRequest;

/// Default lifetime of a stored authentication request.
const DEFAULT_MAX_AGE: Duration = Duration::from_secs(300);

/// Store for authentication requests awaiting their response.
///
/// Implementations key the record by whatever correlates a browser across
/// the redirect round-trip (typically an opaque session cookie) and own the
/// expiry policy for records whose response never arrives.
#[async_trait]
pub trait Saml2AuthenticationRequestRepository: Send + Sync {
    /// Saves `request` under the given session key, replacing any previous
    /// record for that session.
    async fn save_authentication_request(
        &self,
        session_id: &str,
        request: Saml2AuthenticationRequest,
    );

    /// Loads and atomically removes the record correlated with `request`.
    ///
    /// Returns `None` when nothing is stored for the request; unsolicited
    /// responses are expected to land here and are not an error.
    async fn take_authentication_request(
        &self,
        request: &SamlWebRequest,
    ) -> Option<Saml2AuthenticationRequest>;
}

/// Session-keyed in-memory request store.
///
/// Records older than the configured maximum age are dropped at take time
/// rather than by a background sweeper.
#[derive(Debug)]
pub struct InMemoryAuthenticationRequestRepository {
    requests: DashMap<String, Saml2AuthenticationRequest>,
    max_age: Duration,
}

impl InMemoryAuthenticationRequestRepository {
    /// Creates a store with the default record lifetime.
    #[must_use]
    pub fn new() -> Self {
        Self::with_max_age(DEFAULT_MAX_AGE)
    }

    /// Creates a store whose records expire after `max_age`.
    #[must_use]
    pub fn with_max_age(max_age: Duration) -> Self {
        Self {
            requests: DashMap::new(),
            max_age,
        }
    }
}

impl Default for InMemoryAuthenticationRequestRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Saml2AuthenticationRequestRepository for InMemoryAuthenticationRequestRepository {
    async fn save_authentication_request(
        &self,
        session_id: &str,
        request: Saml2AuthenticationRequest,
    ) {
        self.requests.insert(session_id.to_string(), request);
    }

    async fn take_authentication_request(
        &self,
        request: &SamlWebRequest,
    ) -> Option<Saml2AuthenticationRequest> {
        let session_id = request.session_id()?;
        let (_, stored) = self.requests.remove(session_id)?;
        if stored.age_seconds() > self.max_age.as_secs() as i64 {
            tracing::debug!(session_id, "stored authentication request expired");
            return None;
        }
        Some(stored)
    }
}

//! Server configuration.
//!
//! Configuration is loaded from environment variables with sensible defaults.

use rp_saml::bindings::DEFAULT_MAX_INFLATED_LEN;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server host to bind to.
    pub host: String,

    /// Server port.
    pub port: u16,

    /// Base URL for the server (used in generated URLs).
    pub base_url: String,

    /// Registration id of the configured tenant.
    pub registration_id: String,

    /// Entity ID this service provider presents to the asserting party.
    pub sp_entity_id: String,

    /// Entity ID of the asserting party.
    pub idp_entity_id: String,

    /// Single Sign-On URL of the asserting party.
    pub idp_sso_url: String,

    /// Lifetime of a stored authentication request in seconds.
    pub authn_request_lifespan: u64,

    /// Upper bound on the inflated size of redirect-binding payloads.
    pub max_inflated_len: usize,

    /// Log level.
    pub log_level: String,
}

impl ServerConfig {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if it exists
        let _ = dotenvy::dotenv();

        let host = std::env::var("RP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = std::env::var("RP_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);

        let base_url =
            std::env::var("RP_BASE_URL").unwrap_or_else(|_| format!("http://{host}:{port}"));

        let registration_id =
            std::env::var("RP_REGISTRATION_ID").unwrap_or_else(|_| "default".to_string());

        let sp_entity_id = std::env::var("RP_SP_ENTITY_ID")
            .unwrap_or_else(|_| format!("{base_url}/saml2/metadata"));

        let idp_entity_id = std::env::var("RP_IDP_ENTITY_ID")
            .map_err(|_| anyhow::anyhow!("RP_IDP_ENTITY_ID environment variable is required"))?;

        let idp_sso_url = std::env::var("RP_IDP_SSO_URL")
            .map_err(|_| anyhow::anyhow!("RP_IDP_SSO_URL environment variable is required"))?;

        let authn_request_lifespan = std::env::var("RP_AUTHN_REQUEST_LIFESPAN")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(300); // 5 minutes

        let max_inflated_len = std::env::var("RP_MAX_INFLATED_LEN")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_MAX_INFLATED_LEN);

        let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            host,
            port,
            base_url,
            registration_id,
            sp_entity_id,
            idp_entity_id,
            idp_sso_url,
            authn_request_lifespan,
            max_inflated_len,
            log_level,
        })
    }

    /// Creates a configuration for testing.
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 0, // Random port
            base_url: "http://localhost:8080".to_string(),
            registration_id: "default".to_string(),
            sp_entity_id: "http://localhost:8080/saml2/metadata".to_string(),
            idp_entity_id: "https://idp.example.com".to_string(),
            idp_sso_url: "https://idp.example.com/sso".to_string(),
            authn_request_lifespan: 300,
            max_inflated_len: DEFAULT_MAX_INFLATED_LEN,
            log_level: "debug".to_string(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            base_url: "http://localhost:8080".to_string(),
            registration_id: "default".to_string(),
            sp_entity_id: "http://localhost:8080/saml2/metadata".to_string(),
            idp_entity_id: "https://idp.example.com".to_string(),
            idp_sso_url: "https://idp.example.com/sso".to_string(),
            authn_request_lifespan: 300,
            max_inflated_len: DEFAULT_MAX_INFLATED_LEN,
            log_level: "info".to_string(),
        }
    }
}

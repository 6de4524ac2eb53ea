//! HTTP-Redirect binding encoding for outbound messages.
//!
//! The relying party sends its authentication requests over the redirect
//! binding: the message is raw-DEFLATE-compressed, base64-encoded, and
//! URL-encoded into the query string of the asserting party's SSO URL.

use crate::bindings::codec::{saml_deflate, saml_encode};
use crate::bindings::params;
use crate::error::Saml2Result;

/// Builds the redirect URL carrying an outbound SAML message.
///
/// `xml` lands deflated and encoded in the `SAMLRequest` query parameter;
/// `relay_state` is appended as `RelayState` when present. A destination
/// that already has a query string is extended rather than replaced.
pub fn redirect_binding_url(
    xml: &str,
    destination: &str,
    relay_state: Option<&str>,
) -> Saml2Result<String> {
    let deflated = saml_deflate(xml.as_bytes())?;
    let encoded = saml_encode(&deflated);

    let separator = if destination.contains('?') { '&' } else { '?' };
    let mut url = format!(
        "{destination}{separator}{}={}",
        params::SAML_REQUEST,
        urlencoding::encode(&encoded)
    );
    if let Some(rs) = relay_state {
        url.push_str(&format!(
            "&{}={}",
            params::RELAY_STATE,
            urlencoding::encode(rs)
        ));
    }

    Ok(url)
}

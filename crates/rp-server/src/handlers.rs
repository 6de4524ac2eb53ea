//! SAML relying-party HTTP handlers.
//!
//! The assertion consumer service handlers reduce the inbound HTTP request
//! to a [`SamlWebRequest`] and run it through the converter; the
//! authenticate handler issues the outbound request that the converter later
//! correlates against.

use std::error::Error as _;

use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, Method, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use serde::Deserialize;
use uuid::Uuid;

use rp_saml::authn_request::issue_authn_request;
use rp_saml::bindings::redirect_binding_url;
use rp_saml::repository::Saml2AuthenticationRequestRepository;
use rp_saml::web::SamlWebRequest;
use rp_saml::Saml2Error;

use crate::state::AppState;

/// Name of the session cookie correlating the redirect round-trip.
const SESSION_COOKIE: &str = "RPSESSION";

/// Query parameters for the ACS redirect binding.
#[derive(Debug, Deserialize)]
pub struct AcsRedirectParams {
    /// The SAML response (deflated, base64, URL-encoded).
    #[serde(rename = "SAMLResponse")]
    pub saml_response: Option<String>,

    /// Relay state.
    #[serde(rename = "RelayState")]
    pub relay_state: Option<String>,
}

/// Form data for the ACS POST binding.
#[derive(Debug, Deserialize)]
pub struct AcsPostForm {
    /// The SAML response (base64-encoded).
    #[serde(rename = "SAMLResponse")]
    pub saml_response: Option<String>,

    /// Relay state.
    #[serde(rename = "RelayState")]
    pub relay_state: Option<String>,
}

/// GET handler for the ACS endpoint (HTTP-Redirect binding).
pub async fn acs_redirect(
    State(state): State<AppState>,
    Path(registration_id): Path<String>,
    headers: HeaderMap,
    Query(params): Query<AcsRedirectParams>,
) -> Response {
    let request = SamlWebRequest::new(Method::GET)
        .with_registration_id(registration_id)
        .with_saml_response(params.saml_response)
        .with_relay_state(params.relay_state)
        .with_session_id(session_cookie(&headers));
    complete_authentication(&state, request).await
}

/// POST handler for the ACS endpoint (HTTP-POST binding).
pub async fn acs_post(
    State(state): State<AppState>,
    Path(registration_id): Path<String>,
    headers: HeaderMap,
    Form(form): Form<AcsPostForm>,
) -> Response {
    let request = SamlWebRequest::new(Method::POST)
        .with_registration_id(registration_id)
        .with_saml_response(form.saml_response)
        .with_relay_state(form.relay_state)
        .with_session_id(session_cookie(&headers));
    complete_authentication(&state, request).await
}

/// GET handler initiating sign-in: issues an authentication request and
/// redirects the browser to the asserting party.
pub async fn authenticate(
    State(state): State<AppState>,
    Path(registration_id): Path<String>,
    headers: HeaderMap,
) -> Response {
    let Some(registration) = state.registrations.find_by_registration_id(&registration_id)
    else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let relay_state = Uuid::new_v4().to_string();
    let issued = issue_authn_request(&registration, Some(relay_state.clone()));

    let url = match redirect_binding_url(
        &issued.xml,
        &registration.asserting_party().sso_url,
        Some(&relay_state),
    ) {
        Ok(url) => url,
        Err(err) => {
            tracing::error!(error = %err, "failed to encode outbound authentication request");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let session_id = session_cookie(&headers).unwrap_or_else(|| Uuid::new_v4().to_string());
    state
        .requests
        .save_authentication_request(&session_id, issued.record)
        .await;

    tracing::debug!(
        registration_id = registration.registration_id(),
        "issued authentication request"
    );

    let cookie = format!("{SESSION_COOKIE}={session_id}; Path=/; HttpOnly; SameSite=Lax");
    ([(header::SET_COOKIE, cookie)], Redirect::to(&url)).into_response()
}

/// Runs the conversion and renders its outcome.
async fn complete_authentication(state: &AppState, request: SamlWebRequest) -> Response {
    match state.converter.convert(&request).await {
        Ok(Some(token)) => {
            tracing::info!(
                registration_id = token.registration().registration_id(),
                correlated = token.authentication_request().is_some(),
                relay_state = ?request.relay_state(),
                response_len = token.saml2_response().len(),
                "authentication response accepted for processing"
            );
            // Parsing, signature checks, and validation happen downstream of
            // the token; this server acknowledges receipt.
            Html(response_received_page(
                token.registration().registration_id(),
            ))
            .into_response()
        }
        Ok(None) => {
            tracing::debug!("request not claimed by SAML authentication");
            StatusCode::NOT_FOUND.into_response()
        }
        Err(err) => {
            tracing::warn!(
                error = %err,
                cause = ?err.source(),
                "rejected inbound authentication response"
            );
            authentication_failed_page(&err)
        }
    }
}

/// Extracts the session cookie value from the request headers.
fn session_cookie(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|part| {
        let (name, value) = part.trim().split_once('=')?;
        (name == SESSION_COOKIE).then(|| value.to_string())
    })
}

/// Renders the acknowledgement page for an accepted response.
fn response_received_page(registration_id: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><title>Sign-in</title></head>
<body>
<h1>Sign-in response received</h1>
<p>Registration: {registration_id}</p>
</body>
</html>"#
    )
}

/// Renders the uniform authentication-failure response.
///
/// Only the fixed error code is exposed; the decode-stage cause stays in
/// the server log.
fn authentication_failed_page(err: &Saml2Error) -> Response {
    let status =
        StatusCode::from_u16(err.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let html = format!(
        r#"<!DOCTYPE html>
<html>
<head><title>Sign-in failed</title></head>
<body>
<h1>Sign-in failed</h1>
<p>{}</p>
</body>
</html>"#,
        err.error_code()
    );
    (status, Html(html)).into_response()
}

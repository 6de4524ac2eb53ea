//! SAML 2.0 relying-party (service provider) support.
//!
//! This crate implements the web-facing half of SAML 2.0 authentication for
//! a relying party:
//!
//! - **Bindings** - HTTP-POST and HTTP-Redirect message transport, including
//!   the strict base64 and raw-DEFLATE codec both directions share
//! - **Registrations** - per-tenant configuration and its lookup/resolution
//! - **Request correlation** - issued `AuthnRequest`s stored until the
//!   matching response arrives
//! - **Token conversion** - inbound authentication responses turned into
//!   [`Saml2AuthenticationToken`]s for downstream processing
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`bindings`] - binding classification and the message codec
//! - [`registration`] - relying-party registrations and resolvers
//! - [`authn_request`] - outbound request issuance and the stored record
//! - [`repository`] - storage of in-flight authentication requests
//! - [`converter`] - the response-to-token conversion
//! - [`token`] - the produced authentication token
//! - [`error`] - error types for relying-party operations
//!
//! The token produced here is explicitly unauthenticated: the response it
//! carries has not been parsed, signature-checked, or validated. Those steps
//! belong to the downstream authentication pipeline.
//!
//! # SAML Specifications
//!
//! - [SAML 2.0 Core](https://docs.oasis-open.org/security/saml/v2.0/saml-core-2.0-os.pdf)
//! - [SAML 2.0 Bindings](https://docs.oasis-open.org/security/saml/v2.0/saml-bindings-2.0-os.pdf)

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod authn_request;
pub mod bindings;
pub mod converter;
pub mod error;
pub mod registration;
pub mod repository;
pub mod token;
pub mod web;

pub use converter::Saml2AuthenticationTokenConverter;
pub use error::{Saml2Error, Saml2Result};
pub use token::Saml2AuthenticationToken;
pub use web::SamlWebRequest;

//! Message codec shared by the SAML bindings.
//!
//! Inbound messages arrive base64-encoded and, for the redirect binding,
//! raw-DEFLATE-compressed (RFC 1951, no zlib or gzip framing). Outbound
//! redirect messages are prepared the same way in reverse. Both inputs sit
//! on the trust boundary, so the decode direction is strict and bounded.

use std::borrow::Cow;
use std::io::{Read, Write};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use flate2::read::DeflateDecoder;
use flate2::write::DeflateEncoder;
use flate2::Compression;

use crate::error::{Saml2Error, Saml2Result};

/// Default upper bound on the inflated size of a redirect-binding message.
///
/// The compressed payload is attacker-controlled; the bound keeps a small
/// request from inflating into an arbitrarily large allocation. 1 MiB is far
/// above any real-world SAML message.
pub const DEFAULT_MAX_INFLATED_LEN: usize = 1024 * 1024;

/// Strictly decodes a base64-encoded message parameter.
///
/// Line separators (`\r`, `\n`) are ignored. Any other character outside the
/// standard base64 alphabet, and any malformed or non-canonical padding,
/// fails the decode. Invalid input is never skipped or substituted.
pub fn saml_decode(encoded: &str) -> Saml2Result<Vec<u8>> {
    let compact: Cow<'_, str> = if encoded.contains(['\r', '\n']) {
        Cow::Owned(
            encoded
                .chars()
                .filter(|c| !matches!(c, '\r' | '\n'))
                .collect(),
        )
    } else {
        Cow::Borrowed(encoded)
    };

    STANDARD
        .decode(compact.as_ref())
        .map_err(Saml2Error::InvalidEncoding)
}

/// Base64-encodes an outbound message.
#[must_use]
pub fn saml_encode(data: &[u8]) -> String {
    STANDARD.encode(data)
}

/// Inflates a raw DEFLATE stream into a UTF-8 string.
///
/// `max_len` bounds the inflated size; a stream that would exceed it is
/// rejected the same way as a malformed one. Byte sequences that are not
/// valid UTF-8 are replaced, not rejected.
pub fn saml_inflate(data: &[u8], max_len: usize) -> Saml2Result<String> {
    let mut inflated = Vec::new();
    let mut decoder = DeflateDecoder::new(data).take((max_len as u64).saturating_add(1));
    decoder
        .read_to_end(&mut inflated)
        .map_err(Saml2Error::InvalidCompression)?;

    if inflated.len() > max_len {
        return Err(Saml2Error::InvalidCompression(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            "inflated message exceeds configured size limit",
        )));
    }

    Ok(String::from_utf8_lossy(&inflated).into_owned())
}

/// Compresses an outbound message into a raw DEFLATE stream.
pub fn saml_deflate(data: &[u8]) -> Saml2Result<Vec<u8>> {
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).map_err(Saml2Error::Encode)?;
    encoder.finish().map_err(Saml2Error::Encode)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base64_roundtrip() {
        let original: Vec<u8> = (0..=255).collect();
        let encoded = saml_encode(&original);
        assert_eq!(saml_decode(&encoded).unwrap(), original);
    }

    #[test]
    fn base64_ignores_line_separators() {
        let encoded = saml_encode(b"the quick brown fox jumps over the lazy dog");
        let (head, tail) = encoded.split_at(16);
        let wrapped = format!("{head}\r\n{tail}\n");
        assert_eq!(
            saml_decode(&wrapped).unwrap(),
            b"the quick brown fox jumps over the lazy dog"
        );
    }

    #[test]
    fn base64_rejects_non_alphabet_characters() {
        assert!(matches!(
            saml_decode("QUJD#QUJD"),
            Err(Saml2Error::InvalidEncoding(_))
        ));
        assert!(matches!(
            saml_decode("QUJD\u{ff}"),
            Err(Saml2Error::InvalidEncoding(_))
        ));
    }

    #[test]
    fn base64_rejects_malformed_padding() {
        // Wrong padding length.
        assert!(matches!(
            saml_decode("QQ="),
            Err(Saml2Error::InvalidEncoding(_))
        ));
        // Non-canonical trailing bits.
        assert!(matches!(
            saml_decode("QR=="),
            Err(Saml2Error::InvalidEncoding(_))
        ));
    }

    #[test]
    fn deflate_roundtrip() {
        let original = "Test data for compression, including some UTF-8: \u{00e9}\u{00e8}\u{4e16}";
        let deflated = saml_deflate(original.as_bytes()).unwrap();
        let inflated = saml_inflate(&deflated, DEFAULT_MAX_INFLATED_LEN).unwrap();
        assert_eq!(inflated, original);
    }

    #[test]
    fn inflate_rejects_invalid_streams() {
        // 0x06 opens a block with the reserved type, invalid in any stream.
        assert!(matches!(
            saml_inflate(&[0x06, 0x00, 0x00], DEFAULT_MAX_INFLATED_LEN),
            Err(Saml2Error::InvalidCompression(_))
        ));
    }

    #[test]
    fn inflate_enforces_the_size_limit() {
        let big = vec![0u8; 64 * 1024];
        let deflated = saml_deflate(&big).unwrap();
        assert!(matches!(
            saml_inflate(&deflated, 1024),
            Err(Saml2Error::InvalidCompression(_))
        ));
        // The same stream inflates fine under a sufficient limit.
        assert_eq!(saml_inflate(&deflated, big.len()).unwrap().len(), big.len());
    }
}

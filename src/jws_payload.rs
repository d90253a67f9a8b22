use crate::{error, require, Error, Result};
use base64::Engine;

/// The payload shared by every signature of a JWS, held in its base64url-no-pad encoded form, which
/// is exactly the form that appears in both the wire serializations and the signing input.
#[derive(
    Clone,
    Debug,
    derive_more::Deref,
    derive_more::Display,
    Eq,
    Hash,
    derive_more::Into,
    PartialEq,
)]
pub struct JWSPayload(String);

impl JWSPayload {
    /// Encodes the given bytes.
    pub fn from_bytes(payload_bytes: &[u8]) -> Self {
        Self(base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(payload_bytes))
    }
    /// The base64url-encoded form.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
    /// The decoded payload bytes.
    pub fn decoded(&self) -> Result<Vec<u8>> {
        base64::engine::general_purpose::URL_SAFE_NO_PAD
            .decode(self.0.as_bytes())
            .map_err(|e| error!(Decode, "JWS payload is not valid base64url: {}", e))
    }
}

impl TryFrom<String> for JWSPayload {
    type Error = Error;
    fn try_from(payload_base64: String) -> std::result::Result<Self, Self::Error> {
        require!(
            is_base64url_encoded(payload_base64.as_str()),
            Decode,
            "JWS payload is not base64url-encoded"
        );
        // Reject strings using the right alphabet but with an impossible length or stray trailing bits.
        base64::engine::general_purpose::URL_SAFE_NO_PAD
            .decode(payload_base64.as_bytes())
            .map_err(|e| error!(Decode, "JWS payload is not valid base64url: {}", e))?;
        Ok(Self(payload_base64))
    }
}

impl TryFrom<&str> for JWSPayload {
    type Error = Error;
    fn try_from(payload_base64: &str) -> std::result::Result<Self, Self::Error> {
        Self::try_from(payload_base64.to_string())
    }
}

/// This is base64url without padding.
pub(crate) fn is_base64url_encoded(s: &str) -> bool {
    // Base64urlnopad encoding is a subset of base64url encoding, so we can just check for the presence of
    // characters that are not in the base64url-nopad alphabet.
    s.chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

use crate::{bail, error, jws_payload::is_base64url_encoded, Error, JWSHeader, Result};
use base64::Engine;

/// The wire form of a protected header.  The base64url string is kept verbatim, because the signing
/// input must be built from the exact bytes that were transmitted: JSON has no canonical byte form, so
/// re-serializing the parsed header could produce a different (yet structurally equal) encoding.  The
/// parsed header is only for inspecting fields.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum EncodedHeader {
    /// A protected header that parsed as a [`JWSHeader`].
    Parsed { encoded: String, header: JWSHeader },
    /// Arbitrary bytes in the protected header position, with no schema.  This exists to exercise codec
    /// edge cases in tests and mocks; decoding from the wire never produces it.
    Opaque { encoded: String },
}

impl EncodedHeader {
    /// Serializes the header to JSON and base64url-encodes it.  The resulting string is what will be
    /// signed and transmitted, so the header must pass [`JWSHeader::validate`] first.
    pub fn from_header(header: JWSHeader) -> Result<Self> {
        header.validate()?;
        let header_json = serde_json::to_vec(&header)
            .map_err(|e| error!(Serialization, "JWS header failed to serialize: {}", e))?;
        let encoded = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(header_json);
        Ok(Self::Parsed { encoded, header })
    }
    /// Wraps arbitrary bytes as a protected header.
    pub fn from_opaque_bytes(header_bytes: &[u8]) -> Self {
        Self::Opaque {
            encoded: base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(header_bytes),
        }
    }
    /// Decodes a protected header from its base64url form, retaining the given string verbatim.
    /// Base64url and JSON syntax failures are Decode errors naming the failed stage; a header that is
    /// valid JSON but violates the header schema is a Schema error.
    pub fn decode(encoded: String) -> Result<Self> {
        if !is_base64url_encoded(encoded.as_str()) {
            bail!(
                Decode,
                "protected header base64url stage failed: invalid characters"
            );
        }
        let header_json = base64::engine::general_purpose::URL_SAFE_NO_PAD
            .decode(encoded.as_bytes())
            .map_err(|e| error!(Decode, "protected header base64url stage failed: {}", e))?;
        let header_value: serde_json::Value = serde_json::from_slice(&header_json)
            .map_err(|e| error!(Decode, "protected header JSON stage failed: {}", e))?;
        let header = JWSHeader::try_from(header_value)?;
        Ok(Self::Parsed { encoded, header })
    }
    /// The verbatim base64url string.  This is the left segment of the signing input.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Parsed { encoded, .. } | Self::Opaque { encoded } => encoded.as_str(),
        }
    }
    /// The parsed header, if this isn't opaque.
    pub fn header_o(&self) -> Option<&JWSHeader> {
        match self {
            Self::Parsed { header, .. } => Some(header),
            Self::Opaque { .. } => None,
        }
    }
    pub fn decoded_bytes(&self) -> Result<Vec<u8>> {
        base64::engine::general_purpose::URL_SAFE_NO_PAD
            .decode(self.as_str().as_bytes())
            .map_err(|e| error!(Decode, "protected header base64url stage failed: {}", e))
    }
    pub fn into_string(self) -> String {
        match self {
            Self::Parsed { encoded, .. } | Self::Opaque { encoded } => encoded,
        }
    }
}

impl TryFrom<JWSHeader> for EncodedHeader {
    type Error = Error;
    fn try_from(header: JWSHeader) -> std::result::Result<Self, Self::Error> {
        Self::from_header(header)
    }
}

impl std::fmt::Display for EncodedHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

use crate::{bail, EncodedHeader, JWSHeader, Result};

/// The headers attached to one signature.  There are exactly three legal combinations; there is no
/// variant with neither header, so that case is unrepresentable.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum JWSHeaderUnion {
    /// Only a protected header (the only form the compact serialization can carry).
    Protected(EncodedHeader),
    /// Only an unprotected header.  Nothing header-related is integrity-protected.
    Unprotected(JWSHeader),
    Both {
        protected: EncodedHeader,
        unprotected: JWSHeader,
    },
}

impl JWSHeaderUnion {
    /// Convenience constructor that encodes the given header as a protected header.
    pub fn protected(header: JWSHeader) -> Result<Self> {
        Ok(Self::Protected(EncodedHeader::from_header(header)?))
    }
    pub fn unprotected(header: JWSHeader) -> Self {
        Self::Unprotected(header)
    }
    /// Convenience constructor that encodes the first header as the protected one.
    pub fn both(protected: JWSHeader, unprotected: JWSHeader) -> Result<Self> {
        unprotected.validate()?;
        Ok(Self::Both {
            protected: EncodedHeader::from_header(protected)?,
            unprotected,
        })
    }
    pub fn protected_o(&self) -> Option<&EncodedHeader> {
        match self {
            Self::Protected(protected) | Self::Both { protected, .. } => Some(protected),
            Self::Unprotected(_) => None,
        }
    }
    pub fn unprotected_o(&self) -> Option<&JWSHeader> {
        match self {
            Self::Unprotected(unprotected) | Self::Both { unprotected, .. } => Some(unprotected),
            Self::Protected(_) => None,
        }
    }
    /// The "alg" that governs this signature.  If a protected header is present, its "alg" governs,
    /// even if an unprotected header is also present and names a different one; the unprotected
    /// header's "alg" only governs when there is no protected header at all.  An opaque protected header
    /// has no "alg", so this returns None for it.
    pub fn alg_o(&self) -> Option<&str> {
        match self.protected_o() {
            Some(protected) => protected.header_o().map(|header| header.alg.as_str()),
            None => self.unprotected_o().map(|header| header.alg.as_str()),
        }
    }
    /// Parses the header members of one signature object of the general (or flattened) JSON
    /// serialization.  The variants are attempted in order: Both, then Protected, then Unprotected,
    /// and the first that parses wins.  In particular, a malformed "protected" member does not fail
    /// the parse if the "header" member is usable; the malformed member is dropped.
    pub fn from_signature_object(
        signature_object: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<Self> {
        let protected_ro = signature_object.get("protected").map(parse_protected);
        let unprotected_ro = signature_object.get("header").map(parse_unprotected);
        match (protected_ro, unprotected_ro) {
            (Some(Ok(protected)), Some(Ok(unprotected))) => Ok(Self::Both {
                protected,
                unprotected,
            }),
            (Some(Ok(protected)), unprotected_ro) => {
                if let Some(Err(e)) = unprotected_ro {
                    tracing::warn!(
                        "dropping unusable unprotected header member, using protected header only: {}",
                        e
                    );
                }
                Ok(Self::Protected(protected))
            }
            (protected_ro, Some(Ok(unprotected))) => {
                if let Some(Err(e)) = protected_ro {
                    tracing::warn!(
                        "dropping unusable protected header member, using unprotected header only: {}",
                        e
                    );
                }
                Ok(Self::Unprotected(unprotected))
            }
            (Some(Err(e)), _) | (None, Some(Err(e))) => Err(e),
            (None, None) => bail!(
                Schema,
                "signature has neither a protected nor an unprotected header"
            ),
        }
    }
    /// Writes exactly the header members corresponding to this variant.
    pub fn write_into_signature_object(
        &self,
        signature_object: &mut serde_json::Map<String, serde_json::Value>,
    ) {
        if let Some(protected) = self.protected_o() {
            signature_object.insert(
                "protected".to_string(),
                serde_json::Value::String(protected.as_str().to_string()),
            );
        }
        if let Some(unprotected) = self.unprotected_o() {
            signature_object.insert(
                "header".to_string(),
                serde_json::Value::Object(unprotected.to_header_object()),
            );
        }
    }
}

fn parse_protected(protected_value: &serde_json::Value) -> Result<EncodedHeader> {
    match protected_value {
        serde_json::Value::String(encoded) => EncodedHeader::decode(encoded.clone()),
        _ => bail!(Schema, "protected member must be a string"),
    }
}

fn parse_unprotected(unprotected_value: &serde_json::Value) -> Result<JWSHeader> {
    JWSHeader::try_from(unprotected_value.clone())
}

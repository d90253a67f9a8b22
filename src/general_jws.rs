use crate::{
    bail, error, signing_input, CompactPolicy, EncodedHeader, Error, JWSHeaderUnion, JWSPayload,
    JWSSignature, JWSSignatureList, JWSSignerT, JWSVerifierT, MergeOrder, Result,
    VerificationOutcome,
};

/// A JWS with any number of signatures over one shared payload.  This is the object model behind the
/// general JSON serialization (RFC 7515 Section 7.2.1); the compact and flattened JSON serializations
/// are views of it that exist only when there is exactly one signature.
///
/// A GeneralJWS is immutable.  Signing returns a new GeneralJWS with the new signature first, and the
/// original is untouched, so the same GeneralJWS can be the base of several independent signings,
/// whose results can then be combined with [`GeneralJWS::merged`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GeneralJWS {
    payload: JWSPayload,
    signature_list: JWSSignatureList,
}

impl GeneralJWS {
    /// A JWS with the given payload and no signatures.
    pub fn new(payload: JWSPayload) -> Self {
        Self {
            payload,
            signature_list: JWSSignatureList::new(),
        }
    }
    /// A JWS with the base64url encoding of the given bytes as its payload and no signatures.
    pub fn from_payload_bytes(payload_bytes: &[u8]) -> Self {
        Self::new(JWSPayload::from_bytes(payload_bytes))
    }
    pub fn from_parts(payload: JWSPayload, signature_list: JWSSignatureList) -> Self {
        Self {
            payload,
            signature_list,
        }
    }
    pub fn payload(&self) -> &JWSPayload {
        &self.payload
    }
    /// The signatures, most recently added first.
    pub fn signatures(&self) -> &JWSSignatureList {
        &self.signature_list
    }
    /// Signs the payload with the given header placement and signer, returning a new JWS whose first
    /// signature is the new one, followed by all of this JWS's signatures in their original order.
    pub fn signed(&self, header_union: JWSHeaderUnion, signer: &dyn JWSSignerT) -> Result<Self> {
        let alg = header_union
            .alg_o()
            .ok_or_else(|| error!(Crypto, "JWS header has no governing alg"))?
            .to_string();
        tracing::trace!(
            "GeneralJWS::signed; alg: {:?}, existing signature count: {}",
            alg,
            self.signature_list.len()
        );
        // Protected headers were validated when encoded; unprotected ones may be hand-built.
        if let Some(unprotected) = header_union.unprotected_o() {
            unprotected.validate()?;
        }
        let signing_input = signing_input(&header_union, &self.payload);
        let signature_bytes = signer.sign_jws(alg.as_str(), signing_input.as_slice())?;
        let signature = JWSSignature::new(header_union, signature_bytes.as_slice());
        Ok(Self {
            payload: self.payload.clone(),
            signature_list: self.signature_list.prepended(signature),
        })
    }
    /// Combines the signatures of two JWSes over the same payload.  Signatures from the second operand
    /// (per the given order) that already appear in the first are skipped, so merging two JWSes that
    /// were signed from a common base keeps a single copy of the base's signatures.
    pub fn merged(&self, other: &Self, merge_order: MergeOrder) -> Result<Self> {
        if self.payload != other.payload {
            bail!(Schema, "can't merge JWSes with different payloads");
        }
        let (first, second) = match merge_order {
            MergeOrder::SelfFirst => (self, other),
            MergeOrder::OtherFirst => (other, self),
        };
        let signature_list = first
            .signature_list
            .iter()
            .cloned()
            .chain(
                second
                    .signature_list
                    .iter()
                    .filter(|signature| !first.signature_list.contains(signature))
                    .cloned(),
            )
            .collect();
        Ok(Self {
            payload: self.payload.clone(),
            signature_list,
        })
    }
    /// Verifies the signature at the given index.  An out-of-range index is Indeterminate.
    pub fn verify_signature(
        &self,
        index: usize,
        verifier: &dyn JWSVerifierT,
    ) -> VerificationOutcome {
        match self.signature_list.get(index) {
            Some(signature) => signature.verify(&self.payload, verifier),
            None => VerificationOutcome::indeterminate(format!(
                "JWS has no signature at index {}",
                index
            )),
        }
    }
    /// Verifies each signature independently, in order.
    pub fn verify_all(&self, verifier: &dyn JWSVerifierT) -> Vec<VerificationOutcome> {
        self.signature_list
            .iter()
            .map(|signature| signature.verify(&self.payload, verifier))
            .collect()
    }
    /// The sole signature, if there is exactly one.
    fn sole_signature_o(&self) -> Option<&JWSSignature> {
        if self.signature_list.len() == 1 {
            self.signature_list.first()
        } else {
            None
        }
    }
    /// JWS Compact Serialization under [`CompactPolicy::Lenient`]: present iff there is exactly one
    /// signature.  Absence isn't an error; it means the general JSON serialization should be used.
    pub fn encode_compact(&self) -> Option<String> {
        self.encode_compact_with_policy(CompactPolicy::default())
    }
    /// JWS Compact Serialization `<protected>.<payload>.<signature>`, see RFC 7515 Section 7.1.
    pub fn encode_compact_with_policy(&self, compact_policy: CompactPolicy) -> Option<String> {
        let signature = self.sole_signature_o()?;
        if compact_policy == CompactPolicy::RequireProtectedOnly
            && !matches!(signature.header_union, JWSHeaderUnion::Protected(_))
        {
            return None;
        }
        if signature.header_union.unprotected_o().is_some() {
            tracing::debug!("unprotected JWS header is not representable in compact form");
        }
        let protected_str = signature
            .header_union
            .protected_o()
            .map(EncodedHeader::as_str)
            .unwrap_or("");
        Some(format!(
            "{}.{}.{}",
            protected_str,
            self.payload.as_str(),
            signature.signature
        ))
    }
    /// Same as [`GeneralJWS::encode_compact_with_policy`], but absence is reported as an error.
    pub fn to_compact_string(&self, compact_policy: CompactPolicy) -> Result<String> {
        self.encode_compact_with_policy(compact_policy)
            .ok_or_else(|| {
                error!(
                    Serialization,
                    "compact serialization requires exactly one signature (with a protected-only header under {:?}), but this JWS has {}",
                    compact_policy,
                    self.signature_list.len()
                )
            })
    }
    /// Parses the JWS Compact Serialization.  The protected header segment is retained verbatim.
    pub fn decode_compact(compact_str: &str) -> Result<Self> {
        let mut split = compact_str.split('.');
        let header_base64 = split
            .next()
            .ok_or(error!(Decode, "compact JWS missing header"))?;
        let payload_base64 = split
            .next()
            .ok_or(error!(Decode, "compact JWS missing payload"))?;
        let signature_base64 = split
            .next()
            .ok_or(error!(Decode, "compact JWS missing signature"))?;
        if split.next().is_some() {
            bail!(Decode, "compact JWS has too many parts");
        }
        let protected = EncodedHeader::decode(header_base64.to_string())?;
        let payload = JWSPayload::try_from(payload_base64)?;
        let signature = JWSSignature {
            header_union: JWSHeaderUnion::Protected(protected),
            signature: signature_base64.to_string(),
        };
        Ok(Self {
            payload,
            signature_list: JWSSignatureList::new().prepended(signature),
        })
    }
    /// The general JSON serialization as a JSON value.
    pub fn to_json_value(&self) -> serde_json::Value {
        let signature_value_v = self
            .signature_list
            .iter()
            .map(|signature| serde_json::Value::Object(signature.to_signature_object()))
            .collect();
        let mut jws_object = serde_json::Map::new();
        jws_object.insert(
            "payload".to_string(),
            serde_json::Value::String(self.payload.as_str().to_string()),
        );
        jws_object.insert(
            "signatures".to_string(),
            serde_json::Value::Array(signature_value_v),
        );
        serde_json::Value::Object(jws_object)
    }
    /// JWS JSON Serialization (general syntax), see RFC 7515 Section 7.2.1.
    pub fn encode_json(&self) -> Result<String> {
        serde_json::to_string(&self.to_json_value())
            .map_err(|e| error!(Serialization, "JWS failed to serialize as JSON: {}", e))
    }
    /// Parses a general JSON serialization value.  The "payload" and "signatures" members are required.
    pub fn from_json_value(jws_value: serde_json::Value) -> Result<Self> {
        let jws_object = match jws_value {
            serde_json::Value::Object(jws_object) => jws_object,
            _ => bail!(Schema, "JWS must be a JSON object"),
        };
        let payload = payload_from_jws_object(&jws_object)?;
        let signature_value_v = match jws_object.get("signatures") {
            Some(serde_json::Value::Array(signature_value_v)) => signature_value_v,
            Some(_) => bail!(Schema, "signatures member must be an array"),
            None => bail!(Schema, "missing required signatures member"),
        };
        let signature_list = signature_value_v
            .iter()
            .map(|signature_value| match signature_value {
                serde_json::Value::Object(signature_object) => {
                    JWSSignature::from_signature_object(signature_object)
                }
                _ => bail!(Schema, "each element of signatures must be an object"),
            })
            .collect::<Result<Vec<_>>>()?
            .into_iter()
            .collect();
        Ok(Self {
            payload,
            signature_list,
        })
    }
    pub fn decode_json(json_str: &str) -> Result<Self> {
        let jws_value: serde_json::Value = serde_json::from_str(json_str)
            .map_err(|e| error!(Decode, "JWS is not valid JSON: {}", e))?;
        Self::from_json_value(jws_value)
    }
    /// JWS JSON Serialization (flattened syntax), see RFC 7515 Section 7.2.2.  Like the compact
    /// serialization, this is present iff there is exactly one signature.
    pub fn encode_flattened_json(&self) -> Option<String> {
        let signature = self.sole_signature_o()?;
        let mut jws_object = signature.to_signature_object();
        jws_object.insert(
            "payload".to_string(),
            serde_json::Value::String(self.payload.as_str().to_string()),
        );
        serde_json::to_string(&jws_object).ok()
    }
    pub fn decode_flattened_json(json_str: &str) -> Result<Self> {
        let jws_value: serde_json::Value = serde_json::from_str(json_str)
            .map_err(|e| error!(Decode, "JWS is not valid JSON: {}", e))?;
        let jws_object = match jws_value {
            serde_json::Value::Object(jws_object) => jws_object,
            _ => bail!(Schema, "JWS must be a JSON object"),
        };
        if jws_object.contains_key("signatures") {
            bail!(
                Schema,
                "flattened JWS must not have a signatures member"
            );
        }
        let payload = payload_from_jws_object(&jws_object)?;
        let signature = JWSSignature::from_signature_object(&jws_object)?;
        Ok(Self {
            payload,
            signature_list: JWSSignatureList::new().prepended(signature),
        })
    }
}

impl TryFrom<serde_json::Value> for GeneralJWS {
    type Error = Error;
    fn try_from(jws_value: serde_json::Value) -> std::result::Result<Self, Self::Error> {
        Self::from_json_value(jws_value)
    }
}

impl serde::Serialize for GeneralJWS {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        use serde::Serialize;
        self.to_json_value().serialize(serializer)
    }
}

impl<'de> serde::Deserialize<'de> for GeneralJWS {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        use serde::Deserialize;
        let jws_value = serde_json::Value::deserialize(deserializer)?;
        Self::from_json_value(jws_value).map_err(serde::de::Error::custom)
    }
}

fn payload_from_jws_object(
    jws_object: &serde_json::Map<String, serde_json::Value>,
) -> Result<JWSPayload> {
    match jws_object.get("payload") {
        Some(serde_json::Value::String(payload_base64)) => {
            JWSPayload::try_from(payload_base64.as_str())
        }
        Some(_) => bail!(Schema, "payload member must be a string"),
        None => bail!(Schema, "missing required payload member"),
    }
}

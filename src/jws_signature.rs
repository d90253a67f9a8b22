use crate::{
    bail, error, signing_input, JWSHeaderUnion, JWSPayload, JWSVerifierT, Result,
    VerificationOutcome,
};
use base64::Engine;

/// One signer's contribution to a JWS: its header placement and its signature value.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct JWSSignature {
    pub header_union: JWSHeaderUnion,
    /// The base64url-no-pad encoded signature value, kept as received.  It is only decoded at
    /// verification time, so a malformed value makes verification indeterminate rather than failing
    /// the parse of the whole JWS.
    pub signature: String,
}

impl JWSSignature {
    pub fn new(header_union: JWSHeaderUnion, signature_bytes: &[u8]) -> Self {
        Self {
            header_union,
            signature: base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(signature_bytes),
        }
    }
    /// Decodes the signature value.
    pub fn signature_bytes(&self) -> Result<Vec<u8>> {
        base64::engine::general_purpose::URL_SAFE_NO_PAD
            .decode(self.signature.as_bytes())
            .map_err(|e| error!(Decode, "JWS signature is not valid base64url: {}", e))
    }
    /// Parses one element of the "signatures" array of the general JSON serialization (or the top-level
    /// object of the flattened JSON serialization, ignoring its "payload" member).
    pub fn from_signature_object(
        signature_object: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<Self> {
        let signature = match signature_object.get("signature") {
            Some(serde_json::Value::String(signature)) => signature.clone(),
            Some(_) => bail!(Schema, "signature member must be a string"),
            None => bail!(Schema, "missing required signature member"),
        };
        let header_union = JWSHeaderUnion::from_signature_object(signature_object)?;
        Ok(Self {
            header_union,
            signature,
        })
    }
    pub fn write_into_signature_object(
        &self,
        signature_object: &mut serde_json::Map<String, serde_json::Value>,
    ) {
        self.header_union
            .write_into_signature_object(signature_object);
        signature_object.insert(
            "signature".to_string(),
            serde_json::Value::String(self.signature.clone()),
        );
    }
    pub fn to_signature_object(&self) -> serde_json::Map<String, serde_json::Value> {
        let mut signature_object = serde_json::Map::new();
        self.write_into_signature_object(&mut signature_object);
        signature_object
    }
    /// Checks this signature over the given payload (which is held by the enclosing JWS, not by the
    /// signature).  The "alg" is selected per [`JWSHeaderUnion::alg_o`].
    pub fn verify(&self, payload: &JWSPayload, verifier: &dyn JWSVerifierT) -> VerificationOutcome {
        let alg = match self.header_union.alg_o() {
            Some(alg) => alg,
            None => {
                return VerificationOutcome::indeterminate("JWS signature has no governing alg");
            }
        };
        let signature_bytes = match self.signature_bytes() {
            Ok(signature_bytes) => signature_bytes,
            Err(e) => return VerificationOutcome::indeterminate(e.to_string()),
        };
        let signing_input = signing_input(&self.header_union, payload);
        let outcome = verifier.verify_jws(alg, signing_input.as_slice(), signature_bytes.as_slice());
        tracing::debug!("JWS signature with alg {:?} verified as {}", alg, outcome);
        outcome
    }
}

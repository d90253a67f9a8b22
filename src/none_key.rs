use crate::{bail, JOSEAlgorithmT, JWSSignerT, JWSVerifierT, Result, VerificationOutcome};

/// The "key" for the unsecured "none" alg (RFC 7518 Section 3.6): it signs to zero bytes.  It only
/// verifies a signature as Good if it is empty and the alg is "none", so a verifier only accepts
/// unsecured JWSes if the caller explicitly hands it a NoneKey.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoneKey;

impl JOSEAlgorithmT for NoneKey {
    fn alg(&self) -> String {
        "none".to_string()
    }
}

impl JWSSignerT for NoneKey {
    fn sign_jws(&self, alg: &str, _signing_input: &[u8]) -> Result<Vec<u8>> {
        if alg != "none" {
            bail!(Crypto, "NoneKey can't sign with alg {:?}", alg);
        }
        Ok(Vec::new())
    }
}

impl JWSVerifierT for NoneKey {
    fn verify_jws(
        &self,
        alg: &str,
        _signing_input: &[u8],
        signature_bytes: &[u8],
    ) -> VerificationOutcome {
        if alg != "none" {
            return VerificationOutcome::indeterminate(format!(
                "NoneKey can't verify alg {:?}",
                alg
            ));
        }
        if signature_bytes.is_empty() {
            VerificationOutcome::Good
        } else {
            VerificationOutcome::bad("alg \"none\" requires an empty signature")
        }
    }
}

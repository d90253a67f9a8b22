use crate::{error, JOSEAlgorithmT, JWSSignerT, JWSVerifierT, Result, VerificationOutcome};
use hmac::{digest::KeyInit, Hmac, Mac};

type HmacSha256 = Hmac<sha2::Sha256>;
type HmacSha384 = Hmac<sha2::Sha384>;
type HmacSha512 = Hmac<sha2::Sha512>;

/// Shared secret for the HMAC-SHA2 algs "HS256", "HS384" and "HS512" (RFC 7518 Section 3.2).
/// The same key signs and verifies.
#[derive(Clone)]
pub struct HMACKey(Vec<u8>);

impl HMACKey {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self(secret.into())
    }
}

impl std::fmt::Debug for HMACKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "HMACKey(<{} secret bytes>)", self.0.len())
    }
}

impl JOSEAlgorithmT for HMACKey {
    fn alg(&self) -> String {
        "HS256".to_string()
    }
}

impl JWSSignerT for HMACKey {
    fn sign_jws(&self, alg: &str, signing_input: &[u8]) -> Result<Vec<u8>> {
        match alg {
            "HS256" => hmac_sign::<HmacSha256>(&self.0, signing_input),
            "HS384" => hmac_sign::<HmacSha384>(&self.0, signing_input),
            "HS512" => hmac_sign::<HmacSha512>(&self.0, signing_input),
            _ => Err(error!(Crypto, "HMACKey can't sign with alg {:?}", alg)),
        }
    }
}

impl JWSVerifierT for HMACKey {
    fn verify_jws(
        &self,
        alg: &str,
        signing_input: &[u8],
        signature_bytes: &[u8],
    ) -> VerificationOutcome {
        match alg {
            "HS256" => hmac_verify::<HmacSha256>(&self.0, signing_input, signature_bytes),
            "HS384" => hmac_verify::<HmacSha384>(&self.0, signing_input, signature_bytes),
            "HS512" => hmac_verify::<HmacSha512>(&self.0, signing_input, signature_bytes),
            _ => VerificationOutcome::indeterminate(format!(
                "HMACKey can't verify alg {:?}",
                alg
            )),
        }
    }
}

fn hmac_sign<M: Mac + KeyInit>(secret: &[u8], signing_input: &[u8]) -> Result<Vec<u8>> {
    let mut mac = <M as Mac>::new_from_slice(secret)
        .map_err(|e| error!(Crypto, "invalid HMAC key: {}", e))?;
    mac.update(signing_input);
    Ok(mac.finalize().into_bytes().to_vec())
}

fn hmac_verify<M: Mac + KeyInit>(
    secret: &[u8],
    signing_input: &[u8],
    signature_bytes: &[u8],
) -> VerificationOutcome {
    let mut mac = match <M as Mac>::new_from_slice(secret) {
        Ok(mac) => mac,
        Err(e) => return VerificationOutcome::indeterminate(format!("invalid HMAC key: {}", e)),
    };
    mac.update(signing_input);
    // verify_slice compares in constant time.
    match mac.verify_slice(signature_bytes) {
        Ok(()) => VerificationOutcome::Good,
        Err(_) => VerificationOutcome::bad("HMAC mismatch"),
    }
}

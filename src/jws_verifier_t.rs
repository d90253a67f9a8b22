use crate::VerificationOutcome;

/// Verification capability supplied by the caller.  Implementations must report
/// [`VerificationOutcome::Indeterminate`] for an alg they don't support, never Good.
pub trait JWSVerifierT {
    fn verify_jws(
        &self,
        alg: &str,
        signing_input: &[u8],
        signature_bytes: &[u8],
    ) -> VerificationOutcome;
}

#[cfg(feature = "ed25519-dalek")]
impl JWSVerifierT for ed25519_dalek::VerifyingKey {
    fn verify_jws(
        &self,
        alg: &str,
        signing_input: &[u8],
        signature_bytes: &[u8],
    ) -> VerificationOutcome {
        if alg != "EdDSA" {
            return unsupported_alg("Ed25519", alg);
        }
        let signature = match ed25519_dalek::Signature::from_slice(signature_bytes) {
            Ok(signature) => signature,
            Err(_) => return VerificationOutcome::bad("malformed Ed25519 signature"),
        };
        verification_outcome(signature::Verifier::verify(self, signing_input, &signature))
    }
}

#[cfg(feature = "k256")]
impl JWSVerifierT for k256::ecdsa::VerifyingKey {
    fn verify_jws(
        &self,
        alg: &str,
        signing_input: &[u8],
        signature_bytes: &[u8],
    ) -> VerificationOutcome {
        if alg != "ES256K" {
            return unsupported_alg("secp256k1", alg);
        }
        let signature = match k256::ecdsa::Signature::from_slice(signature_bytes) {
            Ok(signature) => signature,
            Err(_) => return VerificationOutcome::bad("malformed ES256K signature"),
        };
        verification_outcome(signature::Verifier::verify(self, signing_input, &signature))
    }
}

#[cfg(feature = "p256")]
impl JWSVerifierT for p256::ecdsa::VerifyingKey {
    fn verify_jws(
        &self,
        alg: &str,
        signing_input: &[u8],
        signature_bytes: &[u8],
    ) -> VerificationOutcome {
        if alg != "ES256" {
            return unsupported_alg("P-256", alg);
        }
        let signature = match p256::ecdsa::Signature::from_slice(signature_bytes) {
            Ok(signature) => signature,
            Err(_) => return VerificationOutcome::bad("malformed ES256 signature"),
        };
        verification_outcome(signature::Verifier::verify(self, signing_input, &signature))
    }
}

#[cfg(feature = "rsa")]
impl JWSVerifierT for rsa::RsaPublicKey {
    fn verify_jws(
        &self,
        alg: &str,
        signing_input: &[u8],
        signature_bytes: &[u8],
    ) -> VerificationOutcome {
        use signature::Verifier;
        let signature = match rsa::pkcs1v15::Signature::try_from(signature_bytes) {
            Ok(signature) => signature,
            Err(_) => return VerificationOutcome::bad("malformed RSA signature"),
        };
        let verify_r = match alg {
            "RS256" => rsa::pkcs1v15::VerifyingKey::<sha2::Sha256>::new(self.clone())
                .verify(signing_input, &signature),
            "RS384" => rsa::pkcs1v15::VerifyingKey::<sha2::Sha384>::new(self.clone())
                .verify(signing_input, &signature),
            "RS512" => rsa::pkcs1v15::VerifyingKey::<sha2::Sha512>::new(self.clone())
                .verify(signing_input, &signature),
            _ => return unsupported_alg("RSA", alg),
        };
        verification_outcome(verify_r)
    }
}

#[cfg(any(
    feature = "ed25519-dalek",
    feature = "k256",
    feature = "p256",
    feature = "rsa"
))]
fn unsupported_alg(key_type: &str, alg: &str) -> VerificationOutcome {
    VerificationOutcome::indeterminate(format!("{} key can't verify alg {:?}", key_type, alg))
}

#[cfg(any(
    feature = "ed25519-dalek",
    feature = "k256",
    feature = "p256",
    feature = "rsa"
))]
fn verification_outcome(
    verify_r: std::result::Result<(), signature::Error>,
) -> VerificationOutcome {
    match verify_r {
        Ok(()) => VerificationOutcome::Good,
        Err(_) => VerificationOutcome::bad("signature did not verify"),
    }
}

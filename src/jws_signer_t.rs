use crate::Result;

/// Signing capability supplied by the caller.  Implementations must return an error (never a
/// signature) for an alg they don't support.
pub trait JWSSignerT {
    /// Produces the raw signature bytes over the given signing input using the given alg.
    fn sign_jws(&self, alg: &str, signing_input: &[u8]) -> Result<Vec<u8>>;
}

#[cfg(feature = "ed25519-dalek")]
impl JWSSignerT for ed25519_dalek::SigningKey {
    fn sign_jws(&self, alg: &str, signing_input: &[u8]) -> Result<Vec<u8>> {
        crate::require!(
            alg == "EdDSA",
            Crypto,
            "Ed25519 key can't sign with alg {:?}",
            alg
        );
        let signature: ed25519_dalek::Signature = signature::Signer::sign(self, signing_input);
        Ok(signature.to_bytes().to_vec())
    }
}

#[cfg(feature = "k256")]
impl JWSSignerT for k256::ecdsa::SigningKey {
    fn sign_jws(&self, alg: &str, signing_input: &[u8]) -> Result<Vec<u8>> {
        crate::require!(
            alg == "ES256K",
            Crypto,
            "secp256k1 key can't sign with alg {:?}",
            alg
        );
        // JWS uses the fixed-width r || s encoding, not DER.
        let signature: k256::ecdsa::Signature = signature::Signer::sign(self, signing_input);
        Ok(signature.to_bytes().to_vec())
    }
}

#[cfg(feature = "p256")]
impl JWSSignerT for p256::ecdsa::SigningKey {
    fn sign_jws(&self, alg: &str, signing_input: &[u8]) -> Result<Vec<u8>> {
        crate::require!(
            alg == "ES256",
            Crypto,
            "P-256 key can't sign with alg {:?}",
            alg
        );
        // JWS uses the fixed-width r || s encoding, not DER.
        let signature: p256::ecdsa::Signature = signature::Signer::sign(self, signing_input);
        Ok(signature.to_bytes().to_vec())
    }
}

#[cfg(feature = "rsa")]
impl JWSSignerT for rsa::RsaPrivateKey {
    fn sign_jws(&self, alg: &str, signing_input: &[u8]) -> Result<Vec<u8>> {
        use signature::{SignatureEncoding, Signer};
        let signature_r = match alg {
            "RS256" => rsa::pkcs1v15::SigningKey::<sha2::Sha256>::new(self.clone())
                .try_sign(signing_input)
                .map(|signature| signature.to_vec()),
            "RS384" => rsa::pkcs1v15::SigningKey::<sha2::Sha384>::new(self.clone())
                .try_sign(signing_input)
                .map(|signature| signature.to_vec()),
            "RS512" => rsa::pkcs1v15::SigningKey::<sha2::Sha512>::new(self.clone())
                .try_sign(signing_input)
                .map(|signature| signature.to_vec()),
            _ => crate::bail!(Crypto, "RSA key can't sign with alg {:?}", alg),
        };
        signature_r.map_err(|e| crate::error!(Crypto, "RSA signing failed: {}", e))
    }
}

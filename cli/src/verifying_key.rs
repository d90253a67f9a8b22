use crate::Result;
use general_jws::{HMACKey, JWSVerifierT, NoneKey, VerificationOutcome};

/// Any of the key types the CLI can verify with.
pub enum VerifyingKey {
    Ed25519(ed25519_dalek::VerifyingKey),
    P256(p256::ecdsa::VerifyingKey),
    Secp256k1(k256::ecdsa::VerifyingKey),
    RSA(Box<rsa::RsaPublicKey>),
    HMAC(HMACKey),
    None(NoneKey),
}

impl VerifyingKey {
    /// Reads a SubjectPublicKeyInfo PEM public key file, trying each supported key type in turn.
    pub fn read_public_key_pem_file(public_key_path: &std::path::Path) -> Result<Self> {
        use pkcs8::DecodePublicKey;
        if let Ok(verifying_key) =
            ed25519_dalek::VerifyingKey::read_public_key_pem_file(public_key_path)
        {
            return Ok(Self::Ed25519(verifying_key));
        }
        if let Ok(verifying_key) = p256::ecdsa::VerifyingKey::read_public_key_pem_file(public_key_path)
        {
            return Ok(Self::P256(verifying_key));
        }
        if let Ok(verifying_key) = k256::ecdsa::VerifyingKey::read_public_key_pem_file(public_key_path)
        {
            return Ok(Self::Secp256k1(verifying_key));
        }
        if let Ok(public_key) = rsa::RsaPublicKey::read_public_key_pem_file(public_key_path) {
            return Ok(Self::RSA(Box::new(public_key)));
        }
        anyhow::bail!(
            "Public key at path {:?} was not in a recognized format.",
            public_key_path
        );
    }
    fn as_jws_verifier(&self) -> &dyn JWSVerifierT {
        match self {
            Self::Ed25519(verifying_key) => verifying_key,
            Self::P256(verifying_key) => verifying_key,
            Self::Secp256k1(verifying_key) => verifying_key,
            Self::RSA(public_key) => &**public_key,
            Self::HMAC(hmac_key) => hmac_key,
            Self::None(none_key) => none_key,
        }
    }
}

impl JWSVerifierT for VerifyingKey {
    fn verify_jws(
        &self,
        alg: &str,
        signing_input: &[u8],
        signature_bytes: &[u8],
    ) -> VerificationOutcome {
        self.as_jws_verifier()
            .verify_jws(alg, signing_input, signature_bytes)
    }
}

use crate::Result;
use general_jws::{HMACKey, JOSEAlgorithmT, JWSSignerT, NoneKey};

/// Any of the key types the CLI can sign with.
pub enum SigningKey {
    Ed25519(ed25519_dalek::SigningKey),
    P256(p256::ecdsa::SigningKey),
    Secp256k1(k256::ecdsa::SigningKey),
    RSA(Box<rsa::RsaPrivateKey>),
    HMAC(HMACKey),
    None(NoneKey),
}

impl SigningKey {
    /// Reads a PKCS#8 PEM private key file, trying each supported key type in turn.
    pub fn read_pkcs8_pem_file(private_key_path: &std::path::Path) -> Result<Self> {
        use pkcs8::DecodePrivateKey;
        if let Ok(signing_key) = ed25519_dalek::SigningKey::read_pkcs8_pem_file(private_key_path) {
            return Ok(Self::Ed25519(signing_key));
        }
        if let Ok(signing_key) = p256::ecdsa::SigningKey::read_pkcs8_pem_file(private_key_path) {
            return Ok(Self::P256(signing_key));
        }
        if let Ok(signing_key) = k256::ecdsa::SigningKey::read_pkcs8_pem_file(private_key_path) {
            return Ok(Self::Secp256k1(signing_key));
        }
        if let Ok(private_key) = rsa::RsaPrivateKey::read_pkcs8_pem_file(private_key_path) {
            return Ok(Self::RSA(Box::new(private_key)));
        }
        anyhow::bail!(
            "Private key at path {:?} was not in a recognized format.",
            private_key_path
        );
    }
    fn as_jws_signer(&self) -> &dyn JWSSignerT {
        match self {
            Self::Ed25519(signing_key) => signing_key,
            Self::P256(signing_key) => signing_key,
            Self::Secp256k1(signing_key) => signing_key,
            Self::RSA(private_key) => &**private_key,
            Self::HMAC(hmac_key) => hmac_key,
            Self::None(none_key) => none_key,
        }
    }
}

impl JOSEAlgorithmT for SigningKey {
    fn alg(&self) -> String {
        match self {
            Self::Ed25519(signing_key) => signing_key.alg(),
            Self::P256(signing_key) => signing_key.alg(),
            Self::Secp256k1(signing_key) => signing_key.alg(),
            Self::RSA(private_key) => private_key.alg(),
            Self::HMAC(hmac_key) => hmac_key.alg(),
            Self::None(none_key) => none_key.alg(),
        }
    }
}

impl JWSSignerT for SigningKey {
    fn sign_jws(&self, alg: &str, signing_input: &[u8]) -> general_jws::Result<Vec<u8>> {
        self.as_jws_signer().sign_jws(alg, signing_input)
    }
}

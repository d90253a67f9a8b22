/// Specifies the JWS header "alg" field naturally associated with a key.
/// See <https://www.rfc-editor.org/rfc/rfc7518#page-6> for the registered values.
pub trait JOSEAlgorithmT {
    /// The JWS "alg" field.  For example, "ES256" corresponds to P-256 keys, "ES256K"
    /// corresponds to secp256k1 keys, "EdDSA" corresponds to Ed25519 keys, etc.
    fn alg(&self) -> String;
}

#[cfg(feature = "ed25519-dalek")]
impl JOSEAlgorithmT for ed25519_dalek::SigningKey {
    fn alg(&self) -> String {
        "EdDSA".to_string()
    }
}

#[cfg(feature = "ed25519-dalek")]
impl JOSEAlgorithmT for ed25519_dalek::VerifyingKey {
    fn alg(&self) -> String {
        "EdDSA".to_string()
    }
}

#[cfg(feature = "k256")]
impl JOSEAlgorithmT for k256::ecdsa::SigningKey {
    fn alg(&self) -> String {
        "ES256K".to_string()
    }
}

#[cfg(feature = "k256")]
impl JOSEAlgorithmT for k256::ecdsa::VerifyingKey {
    fn alg(&self) -> String {
        "ES256K".to_string()
    }
}

#[cfg(feature = "p256")]
impl JOSEAlgorithmT for p256::ecdsa::SigningKey {
    fn alg(&self) -> String {
        "ES256".to_string()
    }
}

#[cfg(feature = "p256")]
impl JOSEAlgorithmT for p256::ecdsa::VerifyingKey {
    fn alg(&self) -> String {
        "ES256".to_string()
    }
}

#[cfg(feature = "rsa")]
impl JOSEAlgorithmT for rsa::RsaPrivateKey {
    fn alg(&self) -> String {
        "RS256".to_string()
    }
}

#[cfg(feature = "rsa")]
impl JOSEAlgorithmT for rsa::RsaPublicKey {
    fn alg(&self) -> String {
        "RS256".to_string()
    }
}

use crate::{Result, VerifyingKey};

#[derive(clap::Args)]
pub struct VerifierArgs {
    /// Specify the path of the PEM public key (Ed25519, P-256, secp256k1, or RSA) to verify with.
    #[arg(
        name = "public-key-path",
        env = "GENERAL_JWS_PUBLIC_KEY_PATH",
        short = 'k',
        long,
        value_name = "PATH"
    )]
    pub public_key_path_o: Option<std::path::PathBuf>,
    /// Specify the shared secret to verify HMAC signatures (the HS256, HS384, and HS512 algs) with.
    #[arg(
        name = "hmac-secret",
        env = "GENERAL_JWS_HMAC_SECRET",
        long,
        value_name = "SECRET",
        hide_env_values = true
    )]
    pub hmac_secret_o: Option<String>,
    /// Accept unsecured signatures (alg "none").  Without this, no key accepts them.
    #[arg(long)]
    pub unsecured: bool,
}

impl VerifierArgs {
    pub fn verifying_key(&self) -> Result<VerifyingKey> {
        match (
            self.public_key_path_o.as_ref(),
            self.hmac_secret_o.as_ref(),
            self.unsecured,
        ) {
            (Some(public_key_path), None, false) => {
                anyhow::ensure!(
                    public_key_path.exists(),
                    "Path {:?} specified by --public-key-path does not exist.",
                    public_key_path
                );
                VerifyingKey::read_public_key_pem_file(public_key_path)
            }
            (None, Some(hmac_secret), false) => Ok(VerifyingKey::HMAC(
                general_jws::HMACKey::new(hmac_secret.as_bytes()),
            )),
            (None, None, true) => Ok(VerifyingKey::None(general_jws::NoneKey)),
            _ => anyhow::bail!(
                "Exactly one of --public-key-path, --hmac-secret, or --unsecured must be specified."
            ),
        }
    }
}

use crate::{Result, SigningKey};

#[derive(clap::Args)]
pub struct SignerArgs {
    /// Specify the path of the PKCS#8 PEM private key (Ed25519, P-256, secp256k1, or RSA) to sign with.
    #[arg(
        name = "private-key-path",
        env = "GENERAL_JWS_PRIVATE_KEY_PATH",
        short = 'k',
        long,
        value_name = "PATH"
    )]
    pub private_key_path_o: Option<std::path::PathBuf>,
    /// Specify the shared secret to sign with using HMAC (the HS256, HS384, and HS512 algs).  Note that
    /// the commandline that invoked a process is typically visible in the process list, so prefer the
    /// env var for this.
    #[arg(
        name = "hmac-secret",
        env = "GENERAL_JWS_HMAC_SECRET",
        long,
        value_name = "SECRET",
        hide_env_values = true
    )]
    pub hmac_secret_o: Option<String>,
    /// Produce an unsecured signature (alg "none"), which has an empty signature value.
    #[arg(long)]
    pub unsecured: bool,
}

impl SignerArgs {
    pub fn signing_key(&self) -> Result<SigningKey> {
        match (
            self.private_key_path_o.as_ref(),
            self.hmac_secret_o.as_ref(),
            self.unsecured,
        ) {
            (Some(private_key_path), None, false) => {
                anyhow::ensure!(
                    private_key_path.exists(),
                    "Path {:?} specified by --private-key-path does not exist.",
                    private_key_path
                );
                SigningKey::read_pkcs8_pem_file(private_key_path)
            }
            (None, Some(hmac_secret), false) => Ok(SigningKey::HMAC(general_jws::HMACKey::new(
                hmac_secret.as_bytes(),
            ))),
            (None, None, true) => Ok(SigningKey::None(general_jws::NoneKey)),
            _ => anyhow::bail!(
                "Exactly one of --private-key-path, --hmac-secret, or --unsecured must be specified."
            ),
        }
    }
}

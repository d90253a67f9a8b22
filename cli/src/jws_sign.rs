use crate::{HeaderPlacement, OutputArgs, Result, SignerArgs};
use general_jws::{GeneralJWS, JOSEAlgorithmT};
use std::io::Read;

/// Sign a payload using the specified key, and print the resulting JWS in the general JSON
/// serialization to stdout.  The payload is read from stdin unless `--payload` or `--jws-file` is
/// specified.
#[derive(clap::Parser)]
pub struct JWSSign {
    #[command(flatten)]
    pub signer_args: SignerArgs,
    /// Specify the payload directly on the command line.  This is only suitable for small payloads that
    /// don't contain sensitive information, since typically the commandline that invoked a process is
    /// visible in the process list on a Unix system.
    #[arg(name = "payload", short, long, value_name = "PAYLOAD", conflicts_with = "jws-file")]
    pub payload_o: Option<String>,
    /// Specify the file of an existing JWS (in any serialization) to add a signature to.  Its payload
    /// is signed, and the new signature comes before its existing signatures.
    #[arg(name = "jws-file", short = 'f', long, value_name = "FILE")]
    pub jws_file_o: Option<std::path::PathBuf>,
    /// Specify which headers the new signature has.
    #[arg(long, value_name = "PLACEMENT", default_value = "protected", value_enum)]
    pub placement: HeaderPlacement,
    /// Override the "alg" header field.  Defaults to the natural alg of the key (e.g. "EdDSA" for
    /// Ed25519 keys, "HS256" for HMAC secrets).
    #[arg(name = "alg", long, value_name = "ALG")]
    pub alg_o: Option<String>,
    /// Specify the "kid" header field.
    #[arg(name = "kid", long, value_name = "KID")]
    pub kid_o: Option<String>,
    /// Specify the "typ" header field.
    #[arg(name = "typ", long, value_name = "TYP")]
    pub typ_o: Option<String>,
    #[command(flatten)]
    pub output_args: OutputArgs,
}

impl JWSSign {
    pub fn handle(self) -> Result<()> {
        // Handle CLI args and input
        let signing_key = self.signer_args.signing_key()?;
        let base_jws = if let Some(jws_file) = self.jws_file_o.as_deref() {
            crate::read_jws_from_file(jws_file)?
        } else if let Some(payload) = self.payload_o.as_deref() {
            GeneralJWS::from_payload_bytes(payload.as_bytes())
        } else {
            let mut payload_bytes = Vec::new();
            std::io::stdin().read_to_end(&mut payload_bytes)?;
            GeneralJWS::from_payload_bytes(payload_bytes.as_slice())
        };
        let alg = self.alg_o.unwrap_or_else(|| signing_key.alg());
        tracing::debug!(
            "signing with alg {:?} and header placement {:?}",
            alg,
            self.placement
        );
        let header_union = self.placement.header_union(
            alg.as_str(),
            self.kid_o.as_deref(),
            self.typ_o.as_deref(),
        )?;

        // Do the processing
        let jws = base_jws.signed(header_union, &signing_key)?;

        // Write the JWS and optional newline.
        self.output_args.write_jws_str(&jws.encode_json()?)?;

        Ok(())
    }
}

mod header_placement;
mod jws_merge;
mod jws_sign;
mod jws_to_compact;
mod jws_to_json;
mod jws_verify;
mod output_args;
mod signer_args;
mod signing_key;
mod verifier_args;
mod verifying_key;

pub use crate::{
    header_placement::HeaderPlacement, jws_merge::JWSMerge, jws_sign::JWSSign,
    jws_to_compact::JWSToCompact, jws_to_json::JWSToJSON, jws_verify::JWSVerify,
    output_args::OutputArgs, signer_args::SignerArgs, signing_key::SigningKey,
    verifier_args::VerifierArgs, verifying_key::VerifyingKey,
};
pub use anyhow::Result;

/// Parses a JWS in any of the compact, general JSON, or flattened JSON serializations, which are
/// distinguished by their first character and the presence of the "signatures" member.
pub(crate) fn parse_jws(jws_str: &str) -> Result<general_jws::GeneralJWS> {
    let jws_str = jws_str.trim();
    if !jws_str.starts_with('{') {
        tracing::debug!("parsing JWS as compact serialization");
        return Ok(general_jws::GeneralJWS::decode_compact(jws_str)?);
    }
    let jws_value: serde_json::Value = serde_json::from_str(jws_str)?;
    if jws_value.get("signatures").is_some() {
        tracing::debug!("parsing JWS as general JSON serialization");
        Ok(general_jws::GeneralJWS::from_json_value(jws_value)?)
    } else {
        tracing::debug!("parsing JWS as flattened JSON serialization");
        Ok(general_jws::GeneralJWS::decode_flattened_json(jws_str)?)
    }
}

pub(crate) fn read_jws_from_stdin() -> Result<general_jws::GeneralJWS> {
    use std::io::Read;
    let mut jws_string = String::new();
    std::io::stdin().read_to_string(&mut jws_string)?;
    parse_jws(jws_string.as_str())
}

pub(crate) fn read_jws_from_file(jws_path: &std::path::Path) -> Result<general_jws::GeneralJWS> {
    let jws_string = std::fs::read_to_string(jws_path).map_err(|e| {
        anyhow::anyhow!("Failed to read JWS from file {:?}; error was: {}", jws_path, e)
    })?;
    parse_jws(jws_string.as_str())
}

/// General JWS CLI tool for signing, verifying, and converting JSON Web Signatures with any number
/// of signatures.  JWSes are read from stdin and written to stdout.
#[derive(clap::Parser)]
enum Root {
    Merge(JWSMerge),
    Sign(JWSSign),
    #[command(name = "to-compact")]
    ToCompact(JWSToCompact),
    #[command(name = "to-json")]
    ToJSON(JWSToJSON),
    Verify(JWSVerify),
}

impl Root {
    fn handle(self) -> Result<()> {
        match self {
            Self::Merge(x) => x.handle(),
            Self::Sign(x) => x.handle(),
            Self::ToCompact(x) => x.handle(),
            Self::ToJSON(x) => x.handle(),
            Self::Verify(x) => x.handle(),
        }
    }
}

fn main() -> Result<()> {
    // It's necessary to specify EnvFilter::from_default_env in order to use RUST_LOG env var.
    tracing_subscriber::fmt()
        .with_target(true)
        .with_line_number(true)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .compact()
        .with_writer(std::io::stderr)
        .init();

    use clap::Parser;
    // Note that if the env var RUST_BACKTRACE is set to 1 (or "full"), then the backtrace will be printed
    // to stderr if this returns error.
    Root::parse().handle()
}

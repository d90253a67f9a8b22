use crate::{OutputArgs, Result};

/// Combine the signatures of two JWSes over the same payload (e.g. signed independently from a
/// common unsigned or partially-signed JWS) and print the result in the general JSON serialization
/// to stdout.  Signatures present in both are kept once.
#[derive(clap::Parser)]
pub struct JWSMerge {
    /// The first JWS file (in any serialization).
    #[arg(value_name = "FILE")]
    pub first_jws_file: std::path::PathBuf,
    /// The second JWS file (in any serialization).
    #[arg(value_name = "FILE")]
    pub second_jws_file: std::path::PathBuf,
    /// Specify whose signatures come first in the result.  "self-first" puts the first file's
    /// signatures first.
    #[arg(long, value_name = "ORDER", default_value = "self-first", value_enum)]
    pub order: general_jws::MergeOrder,
    #[command(flatten)]
    pub output_args: OutputArgs,
}

impl JWSMerge {
    pub fn handle(self) -> Result<()> {
        let first_jws = crate::read_jws_from_file(&self.first_jws_file)?;
        let second_jws = crate::read_jws_from_file(&self.second_jws_file)?;
        let jws = first_jws.merged(&second_jws, self.order)?;
        tracing::debug!(
            "merged JWSes with {} and {} signatures into one with {}",
            first_jws.signatures().len(),
            second_jws.signatures().len(),
            jws.signatures().len()
        );

        self.output_args.write_jws_str(&jws.encode_json()?)?;

        Ok(())
    }
}

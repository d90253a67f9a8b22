use crate::{OutputArgs, Result};

/// Read a JWS from stdin (in any serialization) and print its compact serialization to stdout.  This
/// is only possible if the JWS has exactly one signature.
#[derive(clap::Parser)]
pub struct JWSToCompact {
    /// Specify which single-signature JWSes have a compact serialization.  "lenient" drops the
    /// unprotected header, if any; "require-protected-only" refuses a signature with an unprotected
    /// header.
    #[arg(long, value_name = "POLICY", default_value = "lenient", value_enum)]
    pub policy: general_jws::CompactPolicy,
    #[command(flatten)]
    pub output_args: OutputArgs,
}

impl JWSToCompact {
    pub fn handle(self) -> Result<()> {
        let jws = crate::read_jws_from_stdin()?;
        let compact = jws.to_compact_string(self.policy)?;

        self.output_args.write_jws_str(&compact)?;

        Ok(())
    }
}

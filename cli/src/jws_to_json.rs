use crate::{OutputArgs, Result};

/// Read a JWS from stdin (in any serialization) and print its general JSON serialization to stdout.
#[derive(clap::Parser)]
pub struct JWSToJSON {
    /// Print the flattened JSON serialization instead, which is only possible if the JWS has exactly
    /// one signature.
    #[arg(long)]
    pub flattened: bool,
    #[command(flatten)]
    pub output_args: OutputArgs,
}

impl JWSToJSON {
    pub fn handle(self) -> Result<()> {
        let jws = crate::read_jws_from_stdin()?;
        let jws_json = if self.flattened {
            jws.encode_flattened_json().ok_or_else(|| {
                anyhow::anyhow!(
                    "Flattened JSON serialization requires exactly one signature, but JWS has {}",
                    jws.signatures().len()
                )
            })?
        } else {
            jws.encode_json()?
        };

        self.output_args.write_jws_str(&jws_json)?;

        Ok(())
    }
}

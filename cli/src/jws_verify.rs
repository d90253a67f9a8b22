use crate::{Result, VerifierArgs};
use std::io::Write;

/// Verify the signatures of a JWS read from stdin (in the compact, general JSON, or flattened JSON
/// serialization) using the specified key.  One line per signature is printed to stdout, giving its
/// index and verification outcome.  Returns an error unless the signatures verify.
#[derive(clap::Parser)]
pub struct JWSVerify {
    #[command(flatten)]
    pub verifier_args: VerifierArgs,
    /// Succeed if at least one signature verifies, instead of requiring all of them to.  This is
    /// appropriate when the JWS has signatures from several signers and the key belongs to one of them.
    #[arg(long)]
    pub any: bool,
}

impl JWSVerify {
    pub fn handle(self) -> Result<()> {
        let verifying_key = self.verifier_args.verifying_key()?;
        let jws = crate::read_jws_from_stdin()?;
        anyhow::ensure!(
            !jws.signatures().is_empty(),
            "JWS has no signatures to verify"
        );

        let outcome_v = jws.verify_all(&verifying_key);
        let mut stdout = std::io::stdout();
        for (index, outcome) in outcome_v.iter().enumerate() {
            writeln!(stdout, "{}: {}", index, outcome)?;
        }

        let good_count = outcome_v.iter().filter(|outcome| outcome.is_good()).count();
        if self.any {
            anyhow::ensure!(good_count > 0, "None of the JWS signatures verified");
        } else {
            anyhow::ensure!(
                good_count == outcome_v.len(),
                "{} of the {} JWS signatures did not verify",
                outcome_v.len() - good_count,
                outcome_v.len()
            );
        }
        tracing::info!("Input JWS was successfully validated.");

        Ok(())
    }
}

use crate::Result;
use std::io::Write;

/// Where and how a command writes the JWS it produces.
#[derive(clap::Args, Debug)]
pub struct OutputArgs {
    /// Write the JWS to this file instead of stdout.  An existing file is overwritten.
    #[arg(name = "output", short, long, value_name = "FILE")]
    pub output_path_o: Option<std::path::PathBuf>,
    /// Do not print a newline at the end of the output.
    #[arg(env = "GENERAL_JWS_NO_NEWLINE", short, long)]
    pub no_newline: bool,
}

impl OutputArgs {
    pub fn write_jws_str(&self, jws_str: &str) -> Result<()> {
        let mut output_bytes = Vec::with_capacity(jws_str.len() + 1);
        output_bytes.extend_from_slice(jws_str.as_bytes());
        if !self.no_newline {
            output_bytes.push(b'\n');
        }
        if let Some(output_path) = self.output_path_o.as_deref() {
            tracing::debug!("writing {} bytes to {:?}", output_bytes.len(), output_path);
            std::fs::write(output_path, output_bytes).map_err(|e| {
                anyhow::anyhow!("Failed to write JWS to file {:?}; error was: {}", output_path, e)
            })?;
        } else {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(output_bytes.as_slice())?;
            stdout.flush()?;
        }
        Ok(())
    }
}

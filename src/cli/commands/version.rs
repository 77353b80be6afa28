use anyhow::Result;

use crate::VERSION;
use crate::cli::Output;

pub async fn execute(output: &Output) -> Result<()> {
    output.header("porosity");
    output.key_value("Version", VERSION, true);
    output.key_value("Thresholds", "0..=255", false);
    output.key_value("Workers available", &num_cpus::get().to_string(), false);
    Ok(())
}

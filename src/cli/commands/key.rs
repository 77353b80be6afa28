use anyhow::Result;
use clap::Args;

use crate::cli::Output;
use crate::sample::parse_key;

#[derive(Args, Debug)]
pub struct KeyArgs {
    /// File names to parse, e.g. 7-2V.png
    #[arg(value_name = "NAME", required = true)]
    pub names: Vec<String>,
}

pub async fn execute(args: KeyArgs, output: &Output) -> Result<()> {
    output.header("Sample Keys");

    let mut failures = 0usize;
    for name in &args.names {
        match parse_key(name) {
            Ok(key) => {
                let value = format!(
                    "sample {}, iteration {}, direction {}",
                    key.sample, key.iteration, key.direction
                );
                output.key_value(name, &value, true);
            }
            Err(e) => {
                output.error(&e.to_string());
                failures += 1;
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{} of {} names could not be parsed", failures, args.names.len());
    }
    Ok(())
}

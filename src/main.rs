use anyhow::Result;
use asset_gen::logging::{init_logging, LoggingConfig};
use asset_gen::Args;
use clap::Parser;

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(LoggingConfig::from_verbosity(args.verbose));

    if let Err(err) = asset_gen::generate_assets(&args) {
        eprintln!("{}", asset_gen::remediation(args.preset));
        return Err(err);
    }
    Ok(())
}

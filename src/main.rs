use std::io;

use structopt::StructOpt;
use tracing_subscriber::EnvFilter;

use payloads::cliopt::CliOpt;
use payloads::runner;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let opt = CliOpt::from_args();

    let default_level = if opt.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    let stdout = io::stdout();
    runner::run(&opt, stdout.lock())?;

    Ok(())
}

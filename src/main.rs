mod command;
mod error;
mod logger;
mod network;
mod session;
mod tariff;

use std::{
    fs::File,
    io::{self, BufRead, BufReader, BufWriter},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use crate::session::Session;

/// Registers transit lines and ticket tariffs, and sells the cheapest tickets for each ride.
///
/// Reads one command per line: `<line> (<H:MM> <stop>)+` adds a line, `<name> <price> <minutes>`
/// adds a tariff and `? <stop> (<line> <stop>)+` asks for tickets.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// File to read commands from; standard input if omitted.
    input: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `ticket_office=trace`. Overrides RUST_LOG.
    #[arg(long)]
    log: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::init_logger(cli.log.as_deref())?;

    let input: Box<dyn BufRead> = match &cli.input {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("opening {path:?}"))?;
            info!(?path, "reading commands from file");
            Box::new(BufReader::new(file))
        }
        None => Box::new(io::stdin().lock()),
    };

    let out = BufWriter::new(io::stdout().lock());
    let err = io::stderr().lock();

    Session::new().run(input, out, err)?;

    Ok(())
}

use std::{fs::File, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use transfer_ledger::{
    bin_utils::{Listing, ProcessError, Service},
    ledger::in_memory::InMemoryLedger,
};

#[derive(Parser, Debug)]
#[command(name = "transfer-ledger")]
#[command(about = "Runs a CSV command script against an in-memory ledger")]
struct Cli {
    /// Command script with a `type,account,target,amount,text` header.
    input: PathBuf,

    /// Table printed to stdout once the script has run.
    #[arg(long, env = "LEDGER_LIST", value_enum, default_value_t = Listing::Accounts)]
    list: Listing,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let file = File::open(&cli.input)
        .with_context(|| format!("Failed to open `{}`", cli.input.display()))?;

    let ledger = InMemoryLedger::new();
    let service = Service {
        ledger: &ledger,
        input: file,
        output: &mut std::io::stdout(),
        listing: cli.list,
        error_printer: Box::new(|line, err: ProcessError| {
            eprintln!("Error at line {line} ({}): {err}", err.status_code())
        }),
    };
    service.run()
}

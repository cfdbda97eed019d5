mod commands;
mod input;
mod terminal;

use commands::{CommandLine, scan};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    terminal::logging::init();

    // An unreadable target list is the one fatal input error: with no
    // targets there is nothing left to scan.
    let targets = input::resolve_targets(&commands.target)?;
    let cfg = commands.to_config();

    scan::scan(targets, &cfg).await
}

use anyhow::Result;
use clap::Parser;

use pgedit::cli::{self, CliArgs};

fn main() -> Result<()> {
    let args = CliArgs::parse();
    pgedit::tracing::init();

    let stdout = std::io::stdout();
    cli::run(args, &mut stdout.lock())
}

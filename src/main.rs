use anyhow::Result;
use clap::Parser;

use gangway::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.run()
}

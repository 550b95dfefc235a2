use std::io;

use anyhow::Result;
use tracing::info;

use castellan_cli::Session;

fn main() -> Result<()> {
    // stdout carries the text protocol; logs go to stderr.
    tracing_subscriber::fmt().with_writer(io::stderr).init();
    info!("castellan starting");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    Session::new().run(stdin.lock(), &mut stdout)?;
    Ok(())
}

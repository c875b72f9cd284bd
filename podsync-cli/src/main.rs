//! Pods multisite sync driver
//!
//! Manages a multisite network stored in one SQLite file and pushes pod
//! schemas between its sites.
//!
//! Usage:
//!   podsync --db network.db add-site 2 two.example
//!   podsync --db network.db import event.json
//!   podsync --db network.db sync event --dry-run
//!
//! Output is JSON on stdout; logs go to stderr.

use anyhow::Result;
use clap::Parser;
use podsync_cli::{run, Args};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let output = run(&args)?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

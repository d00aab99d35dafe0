#![allow(clippy::doc_markdown)]

mod cli;
mod tables;

use clap::{Parser, crate_version};
use rate_explorer::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::cli::Args;

fn main() -> Result {
    let _ = dotenvy::dotenv();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .without_time()
        .compact()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    info!(version = crate_version!(), "starting…");

    Args::parse().run()?;

    info!("done!");
    Ok(())
}

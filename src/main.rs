//! # Catalog Seeder Entry Point

use catalog_seeder::cli::{self, Cli};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    cli::execute(Cli::parse()).await
}

mod cli;

use clap::Parser;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::Cli::parse().run().await {
        // The chain carries the underlying tool or store message.
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

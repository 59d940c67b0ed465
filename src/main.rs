mod api;
mod cli;
mod model;

use clap::Parser;

#[tokio::main]
async fn main() {
    let args = cli::Cli::parse();

    match cli::run(args).await {
        Ok(()) => {}
        Err(e) => {
            // Single user-facing message; every handled failure maps to exit 1.
            eprintln!("{:#}", e);
            std::process::exit(1);
        }
    }
}

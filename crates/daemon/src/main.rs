use clap::Parser;

use ergon_daemon::{process, Args, Config};

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let config = match Config::load(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    process::run(config).await;
}

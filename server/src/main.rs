use clap::Parser;
use log::info;
use server::network::{Server, TICK_PERIOD};
use shared::DEFAULT_MATCH_DURATION_SECS;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Server IP address to bind to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Server port to listen on
    #[arg(short, long, default_value = "8080")]
    port: u16,

    /// Match duration in seconds
    #[arg(short, long, default_value_t = DEFAULT_MATCH_DURATION_SECS)]
    duration: u32,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    if std::env::var("RUST_LOG").is_err() {
        eprintln!("Set RUST_LOG=info for detailed logging");
    }

    let args = Args::parse();

    let addr = format!("{}:{}", args.host, args.port);
    let mut server = Server::new(&addr, TICK_PERIOD, args.duration).await?;

    tokio::select! {
        result = server.run() => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down");
        }
    }

    Ok(())
}

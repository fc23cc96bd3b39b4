use clap::Parser;
use client::history::MatchHistoryClient;
use client::input::{parse_line, ConsoleAction, HELP_TEXT};
use client::network::Connection;
use client::view::render_line;
use log::info;
use shared::{Command, Snapshot};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Server address to connect to
    #[arg(short, long, default_value = "127.0.0.1:8080")]
    server: String,

    /// Enable the operator console (read commands from stdin)
    #[arg(short, long)]
    operator: bool,

    /// Match-history store base URL
    #[arg(long, default_value = "http://localhost:3001")]
    history_url: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    if std::env::var("RUST_LOG").is_err() {
        eprintln!("Set RUST_LOG=info for detailed logging");
    }

    let args = Args::parse();

    let mut connection = Connection::connect(&args.server).await?;

    if !args.operator {
        // Passive viewer: follow the snapshot stream until the server goes away.
        while let Some(snapshot) = connection.recv().await {
            println!("{}", render_line(&snapshot));
        }
        info!("Server closed the connection");
        return Ok(());
    }

    let history = MatchHistoryClient::new(&args.history_url, Duration::from_secs(5))?;
    println!("{}", HELP_TEXT);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut latest: Option<Snapshot> = None;

    loop {
        tokio::select! {
            received = connection.recv() => {
                match received {
                    Some(snapshot) => {
                        println!("{}", render_line(&snapshot));
                        latest = Some(snapshot);
                    }
                    None => {
                        info!("Server closed the connection");
                        break;
                    }
                }
            }

            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if line.trim().is_empty() {
                    continue;
                }

                match parse_line(&line) {
                    Some(ConsoleAction::Issue(command)) => {
                        connection.send(&command).await?;
                    }
                    Some(ConsoleAction::FinishMatch) => {
                        finish_match(&history, &mut connection, latest.as_ref()).await;
                    }
                    Some(ConsoleAction::ShowHistory) => {
                        show_history(&history).await;
                    }
                    Some(ConsoleAction::DeleteMatch(id)) => {
                        match history.delete(id).await {
                            Ok(()) => println!("Deleted match {}", id),
                            Err(e) => eprintln!("Failed to delete match {}: {}", id, e),
                        }
                    }
                    Some(ConsoleAction::Help) => println!("{}", HELP_TEXT),
                    Some(ConsoleAction::Quit) => break,
                    None => println!("Unrecognized command; type 'help' for the list"),
                }
            }
        }
    }

    Ok(())
}

/// Stores the current score, then resets the board for the next match. The
/// reset is ordinary operator commands; the store never touches live state,
/// and a store failure leaves the board exactly as it was.
async fn finish_match(
    history: &MatchHistoryClient,
    connection: &mut Connection,
    latest: Option<&Snapshot>,
) {
    let Some(snapshot) = latest else {
        println!("No snapshot received yet");
        return;
    };

    match history
        .create(snapshot.home_score, snapshot.away_score)
        .await
    {
        Ok(Some(id)) => println!(
            "Stored match {} ({} - {})",
            id, snapshot.home_score, snapshot.away_score
        ),
        Ok(None) => println!(
            "Stored match ({} - {})",
            snapshot.home_score, snapshot.away_score
        ),
        Err(e) => {
            eprintln!("Failed to store match: {}", e);
            return;
        }
    }

    for command in [Command::ResetScores, Command::ResetTimer] {
        if let Err(e) = connection.send(&command).await {
            eprintln!("Failed to reset the board: {}", e);
            return;
        }
    }
}

async fn show_history(history: &MatchHistoryClient) {
    match history.list().await {
        Ok(records) if records.is_empty() => println!("No stored matches"),
        Ok(records) => {
            for record in records {
                println!(
                    "{:>4}  {} - {}  {}",
                    record.id, record.home_score, record.away_score, record.played_at
                );
            }
        }
        Err(e) => eprintln!("Failed to list matches: {}", e),
    }
}

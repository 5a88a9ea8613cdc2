use anyhow::Result;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use citizen_safety::commands::{Command, HELP};
use citizen_safety::{Dashboard, Outcome, PredictionClient, TerminalNotice};

fn handle(dashboard: &mut Dashboard, command: Command, done: &mpsc::UnboundedSender<Outcome>) {
    match command {
        Command::Set(field, value) => {
            dashboard.set_field(field, value);
            tracing::debug!("Updated {}", field);
        }
        Command::Submit => match dashboard.submit() {
            Ok(submission) => {
                let done = done.clone();
                tokio::spawn(async move {
                    let _ = done.send(submission.await);
                });
                println!("Prediction requested.");
            }
            Err(e) => eprintln!("{}", e),
        },
        Command::Show => println!("{}", dashboard.render()),
        Command::Details => {
            let shown = dashboard.toggle_details();
            println!("Model inputs {}.", if shown { "shown" } else { "hidden" });
        }
        Command::Status => {
            let client = dashboard.client().clone();
            tokio::spawn(async move {
                match client.status().await {
                    Ok(status) => println!("Service {}: {}", status.status, status.message),
                    Err(e) => {
                        tracing::error!("Status check failed: {}", e);
                        println!("Service unreachable at {}.", client.base_url());
                    }
                }
            });
        }
        Command::Help => println!("{}", HELP),
        Command::Quit => {}
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "citizen_safety=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting citizen safety client");

    let client = PredictionClient::new()?;
    let mut dashboard = Dashboard::new(client, Arc::new(TerminalNotice));
    let (done_tx, mut done_rx) = mpsc::unbounded_channel();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{}", dashboard.render());
    println!("{}", HELP);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if line.trim().is_empty() {
                    continue;
                }
                match line.parse::<Command>() {
                    Ok(Command::Quit) => break,
                    Ok(command) => handle(&mut dashboard, command, &done_tx),
                    Err(e) => eprintln!("{}", e),
                }
            }
            Some(outcome) = done_rx.recv() => {
                if outcome == Outcome::Applied {
                    println!("{}", dashboard.render());
                }
            }
        }
    }

    tracing::info!("Client shutdown complete");
    Ok(())
}

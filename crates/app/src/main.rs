//! `dawa` — pharmacy POS terminal.
//!
//! Opens the SQLite store, fires the best-effort login notification, then
//! runs a line loop: `/`-prefixed commands drive the POS workflows and
//! canned reports, any other input goes to the assistant.

mod commands;

use anyhow::Context;
use chrono::Utc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use dawa_assistant::{Assistant, Transcript};
use dawa_notify::{GatewayConfig, HttpNotifier, NoopNotifier, Notifier};
use dawa_store::PharmacyStore;

use commands::{COMMANDS, dispatch};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dawa_observability::init();

    let db_path = std::env::var("DAWA_DB").unwrap_or_else(|_| "data/dawa.db".to_string());
    let store = PharmacyStore::open(&db_path)
        .await
        .with_context(|| format!("failed to open pharmacy store at {db_path}"))?;

    let user = std::env::var("DAWA_USER").unwrap_or_else(|_| "pharmacist".to_string());
    send_login_ping(&user).await;

    let assistant = Assistant::new(store.clone());
    let mut transcript = Transcript::new();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    stdout
        .write_all(format!("dawa pharmacy terminal\n{COMMANDS}\n").as_bytes())
        .await?;

    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input == "/quit" || input == "/exit" {
            break;
        }

        let output = match dispatch(&store, input, Utc::now().date_naive()).await? {
            Some(reply) => reply,
            None => match assistant.answer(input).await? {
                Some(reply) => {
                    transcript.record(input, reply.clone());
                    reply
                }
                None => continue,
            },
        };

        stdout.write_all(output.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
    }

    tracing::info!(turns = transcript.len(), "session closed");
    Ok(())
}

/// Best effort: never blocks startup on the gateway, never errors.
async fn send_login_ping(user: &str) {
    let notifier: Box<dyn Notifier> = match GatewayConfig::from_env() {
        Some(config) => Box::new(HttpNotifier::new(config)),
        None => Box::new(NoopNotifier),
    };
    if notifier.notify(user, "logged in").await {
        tracing::info!(user, "login notification delivered");
    } else {
        tracing::debug!(user, "login notification not delivered");
    }
}

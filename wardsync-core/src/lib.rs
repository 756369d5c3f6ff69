use std::sync::Arc;

use time::OffsetDateTime;
use tokio::io::AsyncBufReadExt;

use crate::configs::Settings;
use crate::services::CommandService;

pub mod configs;
pub mod errors;
pub mod services;

/// Drive the engine from stdin, one phrase per line. This is the thin
/// stand-in for an external transport layer; it keeps the process alive so
/// registered tasks fire on their own timeline.
pub async fn run(settings: &Arc<Settings>) {
    let engine = CommandService::new(settings);

    tracing::info!("command console ready, type a phrase or 'state'");

    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();

    while let Ok(Some(line)) = lines.next_line().await {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if line.eq_ignore_ascii_case("state") {
            match serde_json::to_string_pretty(&engine.snapshot().await) {
                Ok(state) => println!("{state}"),
                Err(error) => tracing::error!(%error, "failed to render state"),
            }
            continue;
        }

        let reply = engine.execute(line, OffsetDateTime::now_utc()).await;
        println!("{reply}");
    }
}

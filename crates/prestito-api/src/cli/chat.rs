//! Local console conversation.
//!
//! Drives the same engine as the HTTP adapter, with stdin as the
//! transport. Generated documents are written to the current directory;
//! a failed write is a delivery failure: logged, reported to the user,
//! and the session ends there.

use console::style;
use dialoguer::Input;
use prestito_core::engine::Outbound;
use prestito_types::error::DeliveryError;

use crate::state::AppState;

/// Chat identifier for the single console session.
const CONSOLE_CHAT_ID: &str = "console";

pub async fn run(state: &AppState) -> anyhow::Result<()> {
    println!(
        "{}",
        style("Sessione locale: /start per iniziare, /cancel per annullare, /quit per uscire.")
            .dim()
    );

    loop {
        let line: String = Input::new()
            .with_prompt(">")
            .allow_empty(true)
            .interact_text()?;

        if line.trim() == "/quit" {
            break;
        }

        let engine = state.engine.clone();
        let text = line.clone();
        let outbound =
            tokio::task::spawn_blocking(move || engine.handle_message(CONSOLE_CHAT_ID, &text))
                .await?;

        for message in outbound {
            match message {
                Outbound::Text(body) => println!("{}", style(body).cyan()),
                Outbound::Document { filename, bytes } => {
                    deliver_document(&filename, &bytes).await;
                }
            }
        }
    }

    Ok(())
}

/// Write a generated document to disk, reporting delivery failures
/// without tearing the loop down.
async fn deliver_document(filename: &str, bytes: &[u8]) {
    match tokio::fs::write(filename, bytes).await {
        Ok(()) => {
            println!(
                "{} {}",
                style("Documento salvato:").green().bold(),
                filename
            );
        }
        Err(source) => {
            let err = DeliveryError::FileWrite {
                filename: filename.to_string(),
                source,
            };
            tracing::error!(error = %err, "document delivery failed");
            println!("{}", style("Invio del documento non riuscito.").red());
        }
    }
}

//! Prestito CLI and HTTP transport entry point.
//!
//! Binary name: `presti`
//!
//! Parses CLI arguments, loads configuration, then dispatches to the
//! appropriate command handler or starts the transport adapter.

mod cli;
mod config;
mod http;
mod state;

use clap::Parser;
use clap_complete::generate;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Shell completions don't need config or tracing
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "presti", &mut std::io::stdout());
        return Ok(());
    }

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,prestito=debug",
        _ => "trace",
    };
    let enable_otel = matches!(&cli.command, Commands::Serve { otel: true, .. });
    prestito_observe::init_tracing(filter, enable_otel)
        .map_err(|e| anyhow::anyhow!("tracing init failed: {e}"))?;

    let config = config::load_config(&cli.config).await;

    match cli.command {
        Commands::Serve { bind, otel: _ } => {
            let addr = bind.unwrap_or_else(|| config.transport.bind.clone());
            let app_state = AppState::new(&config);

            if app_state.api_token.is_none() {
                tracing::warn!(
                    "no {} set; the transport endpoint is unauthenticated",
                    config::API_TOKEN_ENV
                );
            }

            let router = http::router::build_router(app_state);
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!(addr = %addr, flow = ?config.flow, "transport adapter listening");
            axum::serve(listener, router).await?;
        }

        Commands::Chat => {
            let app_state = AppState::new(&config);
            cli::chat::run(&app_state).await?;
        }

        Commands::Render {
            name,
            amount,
            term,
            tan,
            taeg,
            output,
        } => {
            cli::render::run(
                &config,
                &name,
                &amount,
                term,
                tan.as_deref(),
                taeg.as_deref(),
                output.as_deref(),
                cli.quiet,
            )
            .await?;
        }

        Commands::Completions { .. } => unreachable!("handled above"),
    }

    prestito_observe::shutdown_tracing();
    Ok(())
}

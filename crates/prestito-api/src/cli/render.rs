//! One-shot contract generation from CLI flags.
//!
//! Bypasses the conversation but reuses the exact same parsing,
//! computation, and rendering pipeline, so a contract produced here is
//! indistinguishable from one produced through a chat.

use anyhow::Context;
use chrono::Utc;
use console::style;
use prestito_core::contract::{CompletedLoan, build_contract_record};
use prestito_core::{finance, input};
use prestito_render::{ContractAssets, PdfRenderer};
use prestito_types::config::BotConfig;

use std::path::{Path, PathBuf};

#[allow(clippy::too_many_arguments)]
pub async fn run(
    config: &BotConfig,
    name: &str,
    amount: &str,
    term: Option<u32>,
    tan: Option<&str>,
    taeg: Option<&str>,
    output: Option<&Path>,
    quiet: bool,
) -> anyhow::Result<()> {
    let customer_name = name.trim();
    anyhow::ensure!(!customer_name.is_empty(), "customer name must not be empty");

    let principal = input::parse_currency(amount).context("invalid --amount")?;
    let term_months = term.unwrap_or(config.defaults.term_months);
    anyhow::ensure!(term_months >= 1, "--term must be at least one month");

    let nominal_rate = tan
        .map(|raw| input::parse_rate_or_default(raw, config.defaults.nominal_rate))
        .unwrap_or(config.defaults.nominal_rate);
    let apr = taeg
        .map(|raw| input::parse_rate_or_default(raw, config.defaults.apr))
        .unwrap_or(config.defaults.apr);

    let monthly_payment = finance::monthly_payment(principal, term_months, nominal_rate)
        .context("payment computation failed")?;

    let loan = CompletedLoan {
        customer_name: customer_name.to_string(),
        principal,
        term_months,
        nominal_rate,
        apr,
        monthly_payment,
    };
    let record = build_contract_record(&loan, Utc::now().date_naive());

    let renderer = PdfRenderer::new(ContractAssets::load(&config.assets));
    let bytes = renderer
        .render_record(&record)
        .context("document rendering failed")?;

    let path = output
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(&record.filename));
    tokio::fs::write(&path, &bytes)
        .await
        .with_context(|| format!("failed to write {}", path.display()))?;

    if !quiet {
        println!(
            "{} {} ({} rate da {})",
            style("Contratto generato:").green().bold(),
            path.display(),
            record.term_months,
            prestito_types::money::format_eur(record.monthly_payment),
        );
    }

    Ok(())
}

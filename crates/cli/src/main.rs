mod args;

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tokenforge_core::export::{export, write_artifacts};
use tokenforge_core::{Diagnostic, Diagnostics, Level, PipelineConfig, TokenSnapshot, TokenStore};
use tracing_subscriber::EnvFilter;

use crate::args::{Cli, Command};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = match &cli.config {
        Some(path) => PipelineConfig::from_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => PipelineConfig::default(),
    };
    if let Some(source) = cli.source_override() {
        config.source = source;
    }

    let store = TokenStore::new(config.loader().await?);
    let snapshot = store.load().await;

    match cli.command {
        Command::List { json } => list(&snapshot, json),
        Command::Export { platforms, out } => export_all(&snapshot, &config, platforms, out).await,
        Command::Check => Ok(check(&snapshot)?),
    }
}

fn list(snapshot: &TokenSnapshot, json: bool) -> Result<ExitCode> {
    let mut stdout = std::io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut stdout, &snapshot.summaries())?;
        writeln!(stdout)?;
        return Ok(ExitCode::SUCCESS);
    }
    let width = snapshot
        .tokens()
        .iter()
        .map(|t| t.name.len())
        .max()
        .unwrap_or(0);
    for token in snapshot.tokens() {
        let mode = token.mode.map(|m| format!(" [{m}]")).unwrap_or_default();
        writeln!(
            stdout,
            "{:<width$}  {:<12}  {}{mode}",
            token.name.as_str(),
            token.token_type.as_str(),
            token.value
        )?;
    }
    if snapshot.is_default() {
        tracing::warn!("token sources unavailable; listed the built-in defaults");
    }
    Ok(ExitCode::SUCCESS)
}

async fn export_all(
    snapshot: &TokenSnapshot,
    config: &PipelineConfig,
    platforms: Vec<tokenforge_core::Platform>,
    out: Option<PathBuf>,
) -> Result<ExitCode> {
    let platforms = if platforms.is_empty() {
        config.output.platforms.clone()
    } else {
        platforms
    };
    let out = out.unwrap_or_else(|| config.output.dir.clone());

    let mut diags = Diagnostics::new();
    let mut stdout = std::io::stdout().lock();
    for platform in platforms {
        let artifacts = export(snapshot.tokens(), platform, &config.output.options, &mut diags)?;
        let dir = out.join(platform.as_str());
        write_artifacts(&dir, &artifacts)
            .await
            .with_context(|| format!("writing {platform} files"))?;
        writeln!(
            stdout,
            "{platform}: {} files in {}",
            artifacts.len(),
            dir.display()
        )?;
    }
    if !diags.is_empty() {
        writeln!(stdout, "{} tokens skipped or renamed", diags.len())?;
    }
    Ok(ExitCode::SUCCESS)
}

fn check(snapshot: &TokenSnapshot) -> std::io::Result<ExitCode> {
    let mut stdout = std::io::stdout().lock();
    for diagnostic in snapshot.diagnostics() {
        writeln!(stdout, "{}: {diagnostic}", diagnostic.level())?;
    }
    let unresolved = snapshot
        .diagnostics()
        .iter()
        .filter(|d| matches!(d, Diagnostic::UnresolvedReference { .. }))
        .count();
    writeln!(
        stdout,
        "{} tokens, {unresolved} unresolved references, {} errors",
        snapshot.tokens().len(),
        snapshot.diagnostics().count(Level::Error)
    )?;
    if snapshot.is_default() {
        writeln!(stdout, "token sets could not be loaded; built-in defaults in use")?;
        return Ok(ExitCode::FAILURE);
    }
    Ok(if unresolved > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

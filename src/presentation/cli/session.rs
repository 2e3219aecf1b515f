use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use super::print_json;
use crate::domain::repositories::SessionRepository;
use crate::infrastructure::database::Database;
use crate::infrastructure::repositories::sessions::SqlSessionRepository;

#[derive(Debug, Subcommand)]
pub enum SessionCommands {
    /// Show the mapping stored for an ssid
    Get(GetSessionCommand),
    /// Store (or overwrite) the qv for an ssid
    Put(PutSessionCommand),
}

#[derive(Debug, Args)]
pub struct GetSessionCommand {
    pub ssid: String,
}

#[derive(Debug, Args)]
pub struct PutSessionCommand {
    pub ssid: String,
    pub qv: String,
}

pub async fn run(database_url: &str, cmd: SessionCommands) -> Result<()> {
    let database = Database::connect(database_url)
        .await
        .with_context(|| format!("failed to open database {database_url}"))?;
    let repo = SqlSessionRepository::new(database.clone_pool());

    match cmd {
        SessionCommands::Get(c) => get_session(&repo, c).await,
        SessionCommands::Put(c) => put_session(&repo, c).await,
    }
}

pub async fn get_session(repo: &dyn SessionRepository, command: GetSessionCommand) -> Result<()> {
    let mapping = repo
        .get_mapping(&command.ssid)
        .await?
        .with_context(|| format!("no mapping stored for ssid {}", command.ssid))?;
    print_json(&mapping)
}

pub async fn put_session(repo: &dyn SessionRepository, command: PutSessionCommand) -> Result<()> {
    repo.put(&command.ssid, &command.qv).await?;
    let mapping = repo
        .get_mapping(&command.ssid)
        .await?
        .context("mapping missing after write")?;
    print_json(&mapping)
}

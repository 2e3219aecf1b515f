use anyhow::{Context, Result};
use clap::Args;
use reqwest::Url;

use super::print_json;
use crate::domain::crawlers::DEFAULT_PROBE_USER_AGENT;
use crate::infrastructure::client::ProbeClient;

#[derive(Debug, Args)]
pub struct ProbeCommand {
    /// Page to fetch
    pub url: String,

    /// User agent to present
    #[arg(long, default_value = DEFAULT_PROBE_USER_AGENT)]
    pub user_agent: String,

    /// Follow up to this many meta-refresh redirects
    #[arg(long, default_value_t = 0)]
    pub follow: usize,
}

pub async fn run(command: ProbeCommand) -> Result<()> {
    let url = Url::parse(&command.url).with_context(|| format!("invalid URL: {}", command.url))?;
    let client = ProbeClient::new(&command.user_agent)?;
    let reports = client.follow(&url, command.follow).await?;
    print_json(&reports)
}

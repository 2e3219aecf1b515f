pub mod probe;
pub mod session;

use std::net::SocketAddr;

use clap::{Args, Parser, Subcommand};

use crate::domain::routing::{MetadataPolicy, SessionResolution};
use probe::ProbeCommand;
use session::SessionCommands;

const DEFAULT_DATABASE_URL: &str = "sqlite://ogshare.db";

#[derive(Debug, Parser)]
#[command(author, version, about = "Reproduce og:url and parameter-order issues in link-preview crawlers", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the HTTP server
    Serve(ServeCommand),

    /// Print the robots.txt served to crawlers
    Robots,

    /// Inspect or seed stored session mappings
    Session {
        #[arg(
            long,
            global = true,
            env = "OGSHARE_DATABASE_URL",
            default_value = DEFAULT_DATABASE_URL
        )]
        database_url: String,

        #[command(subcommand)]
        command: SessionCommands,
    },

    /// Fetch a page the way a link-preview crawler would
    Probe(ProbeCommand),
}

#[derive(Debug, Args)]
pub struct ServeCommand {
    #[arg(long, env = "OGSHARE_DATABASE_URL", default_value = DEFAULT_DATABASE_URL)]
    pub database_url: String,

    #[arg(long, env = "OGSHARE_BIND_ADDRESS", default_value = "127.0.0.1:8000")]
    pub bind_address: SocketAddr,

    /// Origin used in advertised URLs (e.g. a tunnel URL); defaults to the
    /// request's Host header
    #[arg(long, env = "OGSHARE_PUBLIC_URL")]
    pub public_url: Option<String>,

    /// og:url emitted when both qv and ssid are present: drop-qv or session-endpoint
    #[arg(long, env = "OGSHARE_METADATA_POLICY", default_value_t = MetadataPolicy::DropQv)]
    pub metadata_policy: MetadataPolicy,

    /// Whether ssid -> qv mappings are stored and resolved: enabled or disabled
    #[arg(long, env = "OGSHARE_SESSION_RESOLUTION", default_value_t = SessionResolution::Enabled)]
    pub session_resolution: SessionResolution,
}

pub(crate) fn print_json<T>(value: &T) -> anyhow::Result<()>
where
    T: serde::Serialize,
{
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}

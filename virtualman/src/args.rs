use std::path::PathBuf;

use clap::Parser;

/// VirtualMan avatar chat backend
#[derive(Debug, Parser)]
#[command(name = "virtualman", about = "Backend proxying an avatar chat client to Azure OpenAI and Azure Speech")]
pub struct Args {
    /// Optional TOML file with server and logging settings
    #[arg(short, long, env = "VIRTUALMAN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the listen address
    #[arg(long, env = "VIRTUALMAN_LISTEN")]
    pub listen: Option<std::net::SocketAddr>,
}

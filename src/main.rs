// Achievement aggregation API server binary.

use achboard::api::ApiServer;
use achboard::util::env as env_util;
use anyhow::Result;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "achboard", about = "Steam achievement aggregation API server")]
struct Args {
    /// Bind host; overrides API_HOST.
    #[arg(long)]
    host: Option<String>,

    /// Bind port; overrides API_PORT.
    #[arg(long)]
    port: Option<u16>,
}

#[actix_web::main]
async fn main() -> Result<()> {
    env_util::init_env();
    achboard::tracing::init_tracing("info")?;

    let args = Args::parse();

    let mut server = ApiServer::from_env()?;
    if let Some(host) = args.host {
        server.host = host;
    }
    if let Some(port) = args.port {
        server.port = port;
    }

    server.run().await
}

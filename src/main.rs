use clap::Parser;
use log::info;

use sweeper::api::SweeperApi;
use sweeper::conf::Config;
use sweeper::core::{CliArgs, setup_logging};
use sweeper::service::SweeperService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_logging();
    let args = CliArgs::parse();
    info!(args = args; "Sweeper started.");

    let mut config = Config::load(args.config.as_deref())?;
    if let Some(port) = args.port {
        config.server.port = port;
    }
    let addr = config.server.addr();

    let api = SweeperApi::new(SweeperService::new(config));
    api.serve(&addr).await?;
    Ok(())
}

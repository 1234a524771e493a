use std::{io, process::ExitCode, sync::OnceLock};

use application::{cli, logging, Args, Client, Config};
use client::infra::{Http, Sled};
use tracing as log;
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

static LOG_LEVEL: OnceLock<log::Level> = OnceLock::new();

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(logging::layer(io::stderr, &LOG_LEVEL))
        .init();

    match start().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(()) => ExitCode::FAILURE,
    }
}

async fn start() -> Result<(), ()> {
    let Args { config, command } = Args::parse().unwrap_or_else(|e| e.exit());

    let Config {
        api,
        storage,
        client,
        log,
    } = Config::new(config).map_err(|e| {
        log::error!("failed to load `Config`: {e}");
    })?;

    LOG_LEVEL
        .set(log.level.into())
        .unwrap_or_else(|_| unreachable!("first initialization"));

    let storage = Sled::open(&storage.into()).map_err(|e| {
        log::error!("failed to open session storage: {e}");
    })?;
    let gateway = Http::new(api.into()).map_err(|e| {
        log::error!("failed to initialize `Http` gateway: {e}");
    })?;
    let client = Client::new(client.into(), gateway, storage);

    let output = cli::run(&client, command).await.map_err(|e| {
        log::error!("{e}");
    })?;

    let output = serde_json::to_string_pretty(&output).map_err(|e| {
        log::error!("failed to render output: {e}");
    })?;
    println!("{output}");
    Ok(())
}

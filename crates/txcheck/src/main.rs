mod check;
mod cli;
mod server;

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use eyre::WrapErr;

use txcheck_core::Gateway;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let args = cli::Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_file(true)
        .with_line_number(true)
        .with_level(true)
        .init();

    let timeout = Duration::from_secs(args.upstream.upstream_timeout_secs);

    match args.command {
        cli::Command::Serve { bind, port } => {
            let gateway = Gateway::new(&args.upstream.endpoints(), timeout)
                .wrap_err("configure upstream chain APIs")?;
            serve(gateway, &bind, port).await
        }
        cli::Command::Check {
            coin,
            network,
            gateway_url,
            tx_hash,
        } => {
            let backend = match gateway_url {
                Some(url) => check::Backend::remote(&url, timeout)?,
                None => check::Backend::Local(
                    Gateway::new(&args.upstream.endpoints(), timeout)
                        .wrap_err("configure upstream chain APIs")?,
                ),
            };
            check::run(&backend, &coin, network.as_deref(), &tx_hash).await
        }
    }
}

async fn serve(gateway: Gateway, bind: &str, port: u16) -> eyre::Result<()> {
    let state = server::AppState {
        lookup: Arc::new(gateway),
    };
    let router = server::build_router(state);

    let bind_addr = format!("{bind}:{port}");
    if bind == "0.0.0.0" {
        tracing::warn!("server is bound to 0.0.0.0 and accepts lookups from the network");
    }

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .context("bind TCP listener")?;

    println!();
    println!("  txcheck gateway is running:");
    println!("    Lookup:    http://{bind_addr}/lookup?txHash=<hash>&network=<network>");
    println!();

    tracing::info!("listening on {bind_addr}");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("run HTTP server")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

//! Keyscope CLI and web console entry point.
//!
//! Binary name: `keyscope`
//!
//! Parses CLI arguments, loads config, connects to the store, then dispatches
//! to the appropriate command handler or starts the web console server.

mod cli;
mod http;
mod state;

use clap::Parser;
use clap_complete::generate;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // RUST_LOG still wins over these
    let filter = keyscope_observe::tracing_setup::default_directives(cli.verbose, cli.quiet);

    keyscope_observe::tracing_setup::init_tracing(filter, cli.otel)
        .map_err(|e| anyhow::anyhow!(e))?;

    // Shell completions don't need a store connection
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "keyscope", &mut std::io::stdout());
        return Ok(());
    }

    keyscope_observe::tracing_setup::flush_on_exit(async {
        let result = run(cli).await;
        if let Err(e) = &result {
            tracing::error!(error = %e, "Command failed");
        }
        result
    })
    .await
}

async fn run(args: Cli) -> anyhow::Result<()> {
    let config = keyscope_infra::config::load_config(args.config.as_deref()).await;
    let state = AppState::init(config).await?;
    let json = args.json;

    match args.command {
        Commands::Keys {
            search,
            limit,
            values,
        } => {
            cli::keys::list_keys(&state, search.as_deref(), limit, values, json).await?;
        }

        Commands::Get { key } => {
            cli::keys::get_value(&state, &key, json).await?;
        }

        Commands::Set { key, value } => {
            cli::keys::set_value(&state, &key, &value, json).await?;
        }

        Commands::Delete { key } => {
            cli::keys::delete_key(&state, &key, json).await?;
        }

        Commands::Serve { port, host } => {
            let host = host.unwrap_or_else(|| state.config.server.host.clone());
            let port = port.unwrap_or(state.config.server.port);

            let addr = format!("{host}:{port}");
            let listener = tokio::net::TcpListener::bind(&addr).await?;

            println!(
                "  {} Keyscope console listening on {}",
                console::style("⚡").bold(),
                console::style(format!("http://{addr}")).cyan()
            );
            println!("  {}", console::style("Press Ctrl+C to stop").dim());

            let router = http::router::build_router(state);

            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            println!("\n  Server stopped.");
        }

        Commands::Completions { .. } => {}
    }

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn memory_config() -> tempfile::NamedTempFile {
        let file = tempfile::NamedTempFile::new().unwrap();
        tokio::fs::write(file.path(), "[store]\nbackend = \"memory\"\n")
            .await
            .unwrap();
        file
    }

    fn parse(config: &tempfile::NamedTempFile, command: &[&str]) -> Cli {
        let path = config.path().to_str().unwrap();
        let mut argv = vec!["keyscope", "--quiet", "--config", path];
        argv.extend_from_slice(command);
        Cli::try_parse_from(argv).unwrap()
    }

    #[tokio::test]
    async fn test_run_reports_command_failure() {
        let config = memory_config().await;
        let err = run(parse(&config, &["delete", "ghost"])).await.unwrap_err();
        assert!(format!("{err:#}").contains("ghost"));
    }

    #[tokio::test]
    async fn test_run_set_succeeds_on_memory_backend() {
        let config = memory_config().await;
        run(parse(&config, &["--json", "set", "greeting", "hi"]))
            .await
            .unwrap();
    }
}

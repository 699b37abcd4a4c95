mod app;
mod cache;
mod config;
mod events;
mod handlers;
mod service;
mod state;
mod storage;

use std::sync::Arc;

use anyhow::Result;
use bookshelf_core::events::EventSubscriber;
use clap::{Parser, Subcommand};
use listenfd::ListenFd;
use tokio::{net::TcpListener, signal, sync::broadcast::error::RecvError};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{app::create_app, config::Config, state::AppState};

/// Bookshelf - a cached book catalog that publishes change events
#[derive(Parser, Debug)]
#[command(name = "bookshelf")]
#[command(version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    serve: ServeArgs,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default)
    Serve(ServeArgs),
    /// Subscribe to the change-event topic and log every event
    Consume {
        /// Topic to subscribe to (defaults to EVENTS_TOPIC)
        #[arg(long, short)]
        topic: Option<String>,
    },
}

#[derive(clap::Args, Debug)]
struct ServeArgs {
    /// Host address to bind the server to
    #[arg(long, short = 'H', default_value = "0.0.0.0", env = "HOST")]
    host: String,

    /// Port to listen on
    #[arg(long, short, default_value = "3000", env = "PORT")]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bookshelf=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();

    match cli.command {
        Some(Command::Consume { topic }) => {
            let topic = topic.unwrap_or_else(|| config.events_topic.clone());
            let subscriber = AppState::subscriber(&config).await;
            consume(subscriber, &topic).await
        }
        Some(Command::Serve(args)) => serve(&config, args).await,
        None => serve(&config, cli.serve).await,
    }
}

async fn serve(config: &Config, args: ServeArgs) -> Result<()> {
    let state = AppState::new(config).await?;
    let app = create_app(state);

    // Auto-reload support via listenfd
    let mut listenfd = ListenFd::from_env();
    let listener = match listenfd.take_tcp_listener(0)? {
        Some(listener) => {
            listener.set_nonblocking(true)?;
            TcpListener::from_std(listener)?
        }
        None => {
            let addr = format!("{}:{}", args.host, args.port);
            TcpListener::bind(&addr).await?
        }
    };

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Logs every event on `topic` until the stream closes or a shutdown signal
/// arrives.
async fn consume(subscriber: Arc<dyn EventSubscriber>, topic: &str) -> Result<()> {
    let mut receiver = subscriber.subscribe(topic).await?;
    tracing::info!(topic, "Consuming book events");

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            received = receiver.recv() => match received {
                Ok(event) => {
                    tracing::info!(
                        topic,
                        event = event.kind(),
                        book_id = event.book_id(),
                        payload = ?event,
                        "Received book event"
                    );
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(topic, skipped, "Consumer lagged, events dropped");
                }
                Err(RecvError::Closed) => {
                    tracing::info!(topic, "Event stream closed");
                    break;
                }
            },
        }
    }

    tracing::info!("Consumer stopped");
    Ok(())
}

/// Wait for shutdown signals (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down...");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_defaults_to_serve() {
        let cli = Cli::parse_from(["bookshelf", "--port", "4000"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.serve.port, 4000);
    }

    #[test]
    fn test_parse_serve_args() {
        let cli = Cli::parse_from(["bookshelf", "serve", "--host", "127.0.0.1", "--port", "8080"]);
        match cli.command {
            Some(Command::Serve(args)) => {
                assert_eq!(args.host, "127.0.0.1");
                assert_eq!(args.port, 8080);
            }
            other => panic!("expected serve, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_consume_topic() {
        let cli = Cli::parse_from(["bookshelf", "consume", "--topic", "audit"]);
        match cli.command {
            Some(Command::Consume { topic }) => assert_eq!(topic.as_deref(), Some("audit")),
            other => panic!("expected consume, got {other:?}"),
        }
    }
}

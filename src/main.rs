use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use push_worker::config::WorkerConfig;
use push_worker::domain::event::{NotificationClickEvent, PushEvent, WorkerEvent};
use push_worker::domain::notification::NotificationId;
use push_worker::infra::memory::InMemoryPlatform;
use push_worker::jobs::event_loop::{self, WorkerHandle};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = WorkerConfig::from_env()?;
    tracing::info!(
        queue = config.event_queue_capacity,
        malformed_payload = %config.malformed_payload,
        latency_ms = config.platform_latency_ms,
        "starting push worker"
    );

    let (worker, platform) = push_worker::in_memory_worker(&config);
    let handle = event_loop::spawn(worker, config.event_queue_capacity);

    tokio::select! {
        result = read_commands(&handle, &platform) => {
            result?;
        }
        _ = shutdown_signal() => {}
    }

    handle.shutdown().await
}

// One command per line: `push`, `push <raw body>`, `click <id>`, `list`.
async fn read_commands(handle: &WorkerHandle, platform: &InMemoryPlatform) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        match command {
            "push" => {
                let event = if rest.is_empty() {
                    PushEvent::empty()
                } else {
                    PushEvent::with_data(rest.to_string())
                };
                handle.dispatch(event).await?;
            }
            "click" => match rest.parse::<NotificationId>() {
                Ok(id) => match platform.find(id) {
                    Some(notification) => {
                        handle
                            .dispatch(WorkerEvent::from(NotificationClickEvent { notification }))
                            .await?;
                    }
                    None => tracing::warn!(notification_id = %id, "no active notification"),
                },
                Err(err) => tracing::warn!(error = %err, input = %rest, "invalid notification id"),
            },
            "list" => {
                for notification in platform.active() {
                    println!("{}", serde_json::to_string(&notification)?);
                }
            }
            other => tracing::warn!(command = %other, "unknown command"),
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to install Ctrl+C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install SIGTERM handler");
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}

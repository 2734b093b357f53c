use std::io;
use tokio::task::JoinHandle;
use tracing::{info, warn, Level};
use tracing_loki::url::Url;
use tracing_loki::BackgroundTaskController;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{filter, fmt};

const SERVICE_NAME: &str = "chamberboard";

/// Keeps the Loki exporter alive; call [`LokiHandle::shutdown`] before exiting
/// so buffered logs get flushed.
pub struct LokiHandle {
    controller: BackgroundTaskController,
    task: JoinHandle<()>,
}

impl LokiHandle {
    pub async fn shutdown(self) {
        self.controller.shutdown().await;

        if let Err(err) = self.task.await {
            eprintln!("Loki exporter stopped abnormally: {}", err);
        }
    }
}

/// Logs to stdout, and to Loki as well when `loki_url` is set and reachable
pub async fn setup_tracing(loki_url: Option<&str>) -> Option<LokiHandle> {
    let filter = filter::Targets::new()
        .with_target(SERVICE_NAME, Level::TRACE)
        .with_default(Level::WARN);

    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stdout));

    let Some(loki_url) = loki_url else {
        registry.init();
        warn!("Loki URL not provided. Continuing without it.");
        return None;
    };

    let base_url = match loki_url.parse::<Url>() {
        Ok(base_url) => base_url,
        Err(err) => {
            registry.init();
            warn!("Invalid Loki URL '{}' ({}). Continuing without it.", loki_url, err);
            return None;
        }
    };

    if reqwest::get(base_url.clone()).await.is_err() {
        registry.init();
        warn!("Couldn't connect to Loki. Continuing without it.");
        return None;
    }

    let built = tracing_loki::builder()
        .label("service", SERVICE_NAME)
        .and_then(|builder| builder.build_controller_url(base_url));

    match built {
        Ok((layer, controller, task)) => {
            registry.with(layer).init();
            let task = tokio::spawn(task);

            info!("Loki initialized");

            Some(LokiHandle { controller, task })
        }
        Err(err) => {
            registry.init();
            warn!("Failed to build the Loki layer ({}). Continuing without it.", err);
            None
        }
    }
}

//! # thingbridged: thingbridge daemon
//!
//! Composition root that wires the registry and the two buses into the
//! thing service and feeds it commands.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars)
//! - Initialise tracing
//! - Construct the in-memory registry and the client/connector buses
//! - Construct the thing service, injecting them via port traits
//! - Print every published message as one JSON line on stdout
//! - Read newline-delimited JSON commands from stdin until EOF
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! No domain logic belongs here.

mod command;
mod config;
mod intake;

use serde::Serialize;
use tokio::io::BufReader;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing_subscriber::EnvFilter;

use thingbridge_adapter_memory::InMemoryThingRegistry;
use thingbridge_app::message_bus::InProcessBus;
use thingbridge_app::services::thing_service::ThingService;
use thingbridge_domain::message::{ClientMessage, ConnectorMessage};

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .with_writer(std::io::stderr)
        .init();

    // Buses
    let client_bus = InProcessBus::<ClientMessage>::new(config.bus.capacity);
    let connector_bus = InProcessBus::<ConnectorMessage>::new(config.bus.capacity);
    let printers = [
        spawn_printer("client", client_bus.subscribe()),
        spawn_printer("connector", connector_bus.subscribe()),
    ];

    // Service
    let service = ThingService::new(InMemoryThingRegistry::new(), client_bus, connector_bus);

    tracing::info!(capacity = config.bus.capacity, "thingbridged reading commands from stdin");

    intake::run(BufReader::new(tokio::io::stdin()), &service).await?;

    // Dropping the service closes both buses so the printers drain and stop.
    drop(service);
    for printer in printers {
        printer.await?;
    }

    tracing::info!("stdin closed, shutting down");
    Ok(())
}

fn spawn_printer<M>(audience: &'static str, mut rx: broadcast::Receiver<M>) -> JoinHandle<()>
where
    M: Serialize + Clone + Send + 'static,
{
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(message) => {
                    let line = serde_json::json!({ "audience": audience, "message": message });
                    println!("{line}");
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(audience, skipped, "printer lagged behind the bus");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    })
}

//! Newline-delimited command intake.

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use thingbridge_app::ports::{ClientPublisher, ConnectorPublisher, ThingRegistry};
use thingbridge_app::services::thing_service::ThingService;

use crate::command::{self, Command};

/// Dispatch every command read from `reader` until EOF.
///
/// Lines are decoded from raw bytes, so a line that is not UTF-8 or not a
/// valid command is logged and skipped like any other malformed input.
///
/// # Errors
///
/// Returns an error only when reading from `reader` fails.
pub async fn run<Rd, R, C, N>(
    mut reader: Rd,
    service: &ThingService<R, C, N>,
) -> std::io::Result<()>
where
    Rd: AsyncBufRead + Unpin,
    R: ThingRegistry,
    C: ClientPublisher,
    N: ConnectorPublisher,
{
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            return Ok(());
        }
        let line = buf.trim_ascii();
        if line.is_empty() {
            continue;
        }
        let command = match serde_json::from_slice::<Command>(line) {
            Ok(command) => command,
            Err(err) => {
                tracing::warn!(%err, "skipping malformed command");
                continue;
            }
        };
        let kind = command.kind();
        match command::dispatch(service, command).await {
            Ok(()) => tracing::debug!(command = kind, "command completed"),
            Err(err) => tracing::warn!(%err, command = kind, "command failed"),
        }
    }
}

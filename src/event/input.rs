use super::Event;
use crossterm::event;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// How often the terminal is polled for input
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Listen for terminal input events with graceful shutdown support
pub async fn listen(tx: mpsc::Sender<Event>, cancel: CancellationToken) {
    loop {
        tokio::select! {
            // Check for cancellation signal
            () = cancel.cancelled() => {
                tracing::debug!("Input listener cancelled");
                break;
            }
            // Poll for input with timeout
            () = tokio::time::sleep(POLL_INTERVAL) => {
                // Drain everything queued so drags stay smooth
                while event::poll(Duration::ZERO).unwrap_or(false) {
                    let Ok(raw) = event::read() else {
                        break;
                    };
                    let Some(event) = Event::from_crossterm(raw) else {
                        continue;
                    };
                    if tx.send(event).await.is_err() {
                        // Channel closed, exit
                        return;
                    }
                }
            }
        }
    }
}

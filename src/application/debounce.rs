//! Timer-based debounce primitive
//!
//! Independent of any rendering framework: `submit` restarts the window,
//! and only the last value inside the window comes out of the settled
//! channel. Superseded values are discarded, not deprioritized; there is
//! nothing to flush or cancel per keystroke.
//!
//! The selector wires search input through this before re-filtering, with
//! the same 300ms window the UI uses.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Default debounce window for filter-query input.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Debounces submitted values onto a settled channel.
///
/// Dropping the debouncer stops the timer task; a value still inside its
/// window at that point is discarded.
#[derive(Debug)]
pub struct Debouncer<T> {
    input_tx: mpsc::UnboundedSender<T>,
    task: JoinHandle<()>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Create a debouncer and the receiver its settled values arrive on.
    pub fn new(window: Duration) -> (Self, mpsc::UnboundedReceiver<T>) {
        let (input_tx, mut input_rx) = mpsc::unbounded_channel::<T>();
        let (settled_tx, settled_rx) = mpsc::unbounded_channel::<T>();

        let task = tokio::spawn(async move {
            let mut pending: Option<T> = None;
            loop {
                if pending.is_some() {
                    tokio::select! {
                        value = input_rx.recv() => match value {
                            // A newer value supersedes the pending one and
                            // restarts the window.
                            Some(value) => pending = Some(value),
                            None => break,
                        },
                        _ = tokio::time::sleep(window) => {
                            if let Some(value) = pending.take() {
                                if settled_tx.send(value).is_err() {
                                    break;
                                }
                            }
                        }
                    }
                } else {
                    match input_rx.recv().await {
                        Some(value) => pending = Some(value),
                        None => break,
                    }
                }
            }
        });

        (Self { input_tx, task }, settled_rx)
    }

    /// Submit a value; it settles after the window unless superseded first.
    pub fn submit(&self, value: T) {
        let _ = self.input_tx.send(value);
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}

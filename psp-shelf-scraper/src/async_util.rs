//! Drive a page resolution while rendering its events as they arrive.

use std::future::Future;

use tokio::sync::mpsc;
use tokio::time::{Duration, Instant};

/// How long to keep reading events once the task has returned. Senders held
/// by detached tasks would otherwise keep the channel open forever.
const DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

/// Run `task` to completion, handing every event on `events` to `on_event`.
///
/// Events sent before the task returns are always delivered, including the
/// ones still buffered when it finishes.
pub async fn run_with_events<F, E, R>(
    task: F,
    mut events: mpsc::UnboundedReceiver<E>,
    mut on_event: impl FnMut(E),
) -> R
where
    F: Future<Output = R>,
{
    tokio::pin!(task);
    let mut seen: u64 = 0;

    let result = loop {
        tokio::select! {
            r = &mut task => break Some(r),
            event = events.recv() => match event {
                Some(e) => {
                    seen += 1;
                    on_event(e);
                }
                None => break None,
            },
        }
    };

    let Some(result) = result else {
        log::debug!("Event channel closed after {} events; awaiting task", seen);
        return task.await;
    };

    let deadline = Instant::now() + DRAIN_TIMEOUT;
    let mut drained: u64 = 0;
    loop {
        match tokio::time::timeout_at(deadline, events.recv()).await {
            Ok(Some(e)) => {
                drained += 1;
                on_event(e);
            }
            Ok(None) => break,
            Err(_) => {
                log::warn!(
                    "Stopped waiting for events after {}s ({} drained)",
                    DRAIN_TIMEOUT.as_secs(),
                    drained,
                );
                break;
            }
        }
    }

    log::debug!("Handled {} events", seen + drained);
    result
}

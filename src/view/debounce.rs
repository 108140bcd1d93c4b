use std::time::Duration;

use futures_util::Stream;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tokio_stream::wrappers::ReceiverStream;
use tokio_stream::StreamExt;

/// Quiet period the search box waits for before filtering.
pub const SEARCH_QUIET_PERIOD: Duration = Duration::from_millis(300);

/// Emits the latest item once `quiet` has passed without a newer one.
///
/// When `input` ends, a pending item is emitted right away. The forwarding
/// task stops once the returned stream is dropped.
pub fn debounce<S>(input: S, quiet: Duration) -> ReceiverStream<S::Item>
where
    S: Stream + Send + 'static,
    S::Item: Send + 'static,
{
    let (tx, rx) = mpsc::channel(16);

    tokio::spawn(async move {
        tokio::pin!(input);

        let sleep = tokio::time::sleep(quiet);
        tokio::pin!(sleep);

        let mut pending = None;

        loop {
            tokio::select! {
                next = input.next() => match next {
                    Some(item) => {
                        pending = Some(item);
                        sleep.as_mut().reset(Instant::now() + quiet);
                    }
                    None => {
                        if let Some(item) = pending.take() {
                            let _ = tx.send(item).await;
                        }
                        break;
                    }
                },
                () = &mut sleep, if pending.is_some() => {
                    if let Some(item) = pending.take() {
                        if tx.send(item).await.is_err() {
                            break;
                        }
                    }
                }
                () = tx.closed() => break,
            }
        }
    });

    ReceiverStream::new(rx)
}

use crate::events::AppEvent;
use async_channel::Sender;
use orbitcam::SOCKET_PATH;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::net::UnixListener;

pub async fn run_server(tx: Sender<AppEvent>) {
    // stale socket from a previous run
    if std::fs::metadata(SOCKET_PATH).is_ok()
        && let Err(e) = std::fs::remove_file(SOCKET_PATH)
    {
        log::warn!("Could not remove stale socket {}: {}", SOCKET_PATH, e);
    }

    let listener = match UnixListener::bind(SOCKET_PATH) {
        Ok(l) => l,
        Err(e) => {
            log::error!("Failed to bind unix socket: {}", e);
            return;
        }
    };
    log::info!("Listening on {}", SOCKET_PATH);

    loop {
        match listener.accept().await {
            Ok((stream, _)) => {
                tokio::spawn(forward_commands(stream, tx.clone()));
            }
            Err(e) => {
                log::error!("Failed to accept connection: {}", e);
            }
        }
    }
}

/// Reads one command per line until the client hangs up or the app side of
/// the channel is gone. Returns how many events were forwarded.
async fn forward_commands<R: AsyncRead + Unpin>(stream: R, tx: Sender<AppEvent>) -> usize {
    let mut lines = BufReader::new(stream).lines();
    let mut sent = 0;

    while let Ok(Some(line)) = lines.next_line().await {
        let Some(event) = AppEvent::parse_command(&line) else {
            log::warn!("Unknown command: {:?}", line.trim());
            continue;
        };
        log::debug!("Socket command: {}", event);
        if tx.send(event).await.is_err() {
            break;
        }
        sent += 1;
    }
    sent
}

#[cfg(test)]
mod tests {
    use super::*;
    use orbitcam::content::TopicId;

    #[tokio::test]
    async fn test_forwards_known_commands() {
        let (tx, rx) = async_channel::unbounded();
        let input: &[u8] = b"show\nbogus\nfocus 4\n\nunfocus\n";

        assert_eq!(forward_commands(input, tx).await, 3);
        assert_eq!(rx.recv().await, Ok(AppEvent::Show));
        assert_eq!(rx.recv().await, Ok(AppEvent::Focus(TopicId::new(4))));
        assert_eq!(rx.recv().await, Ok(AppEvent::Unfocus));
        assert!(rx.recv().await.is_err());
    }

    #[tokio::test]
    async fn test_stops_when_app_is_gone() {
        let (tx, rx) = async_channel::unbounded();
        drop(rx);
        let input: &[u8] = b"show\nhide\n";

        assert_eq!(forward_commands(input, tx).await, 0);
    }
}

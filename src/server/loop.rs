// Server loop module
// Accepts connections until shutdown, then waits for in-flight connections to finish

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

use super::connection::accept_connection;
use crate::config::AppState;
use crate::logger;

/// Poll interval while draining connections on shutdown
const DRAIN_POLL: Duration = Duration::from_millis(50);

/// Run the accept loop until `state.shutdown` is notified.
pub async fn start_server_loop(
    listener: TcpListener,
    state: Arc<AppState>,
) -> std::io::Result<()> {
    let shutdown = Arc::clone(&state.shutdown);

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(stream, peer_addr, &state);
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            () = shutdown.notified() => break,
        }
    }

    drop(listener);
    logger::log_shutdown(state.active_connections.load(Ordering::SeqCst));
    drain_connections(&state).await;
    Ok(())
}

/// Wait until no connection is active, at most one request timeout
async fn drain_connections(state: &AppState) {
    let grace = Duration::from_secs(state.config.performance.request_timeout);
    let deadline = tokio::time::Instant::now() + grace;

    while state.active_connections.load(Ordering::SeqCst) > 0 {
        if tokio::time::Instant::now() >= deadline {
            logger::log_warning(&format!(
                "Shutdown grace period of {}s elapsed with {} connection(s) open",
                grace.as_secs(),
                state.active_connections.load(Ordering::SeqCst)
            ));
            return;
        }
        tokio::time::sleep(DRAIN_POLL).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::server::create_listener;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    #[tokio::test]
    async fn test_serves_request_then_stops() {
        let mut config = Config::load_from("no-such-config-file").unwrap();
        config.logging.access_log = false;
        config.performance.keep_alive = false;
        let state = Arc::new(AppState::new(config));

        let listener = create_listener("127.0.0.1:0".parse().unwrap()).unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(start_server_loop(listener, Arc::clone(&state)));

        let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
        stream
            .write_all(b"GET /products?category=%EA%B0%80%EA%B5%AC HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
            .await
            .unwrap();
        let mut raw = Vec::new();
        stream.read_to_end(&mut raw).await.unwrap();
        let text = String::from_utf8(raw).unwrap();

        assert!(text.starts_with("HTTP/1.1 200 OK"));
        assert!(text.contains("\"result_count\":1"));
        assert!(text.to_ascii_lowercase().contains("server: record-query/0.1"));

        state.shutdown.notify_one();
        server.await.unwrap().unwrap();
    }
}

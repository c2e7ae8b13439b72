// Server loop module
// Accepts connections until shutdown, then drains in-flight connections

use std::future::Future;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;

use super::connection::accept_connection;
use crate::config::AppState;
use crate::logger;

/// How long in-flight connections may keep running after shutdown starts
const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);
const DRAIN_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Accept connections until `shutdown` resolves.
///
/// The listener is closed as soon as shutdown starts; connections already
/// being served get up to `SHUTDOWN_GRACE` to finish.
pub async fn start_server_loop<S>(listener: TcpListener, state: Arc<AppState>, shutdown: S)
where
    S: Future<Output = ()>,
{
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => accept_connection(stream, peer_addr, &state),
                    Err(e) => logger::log_error(&format!("Failed to accept connection: {e}")),
                }
            }

            () = &mut shutdown => break,
        }
    }

    drop(listener);
    let remaining = drain_connections(&state).await;
    logger::log_shutdown(remaining);
}

/// Wait for active connections to finish, up to the grace period.
/// Returns the number still open when waiting stopped.
async fn drain_connections(state: &AppState) -> usize {
    let deadline = tokio::time::Instant::now() + SHUTDOWN_GRACE;

    loop {
        let active = state.active_connections.load(Ordering::SeqCst);
        if active == 0 || tokio::time::Instant::now() >= deadline {
            return active;
        }
        tokio::time::sleep(DRAIN_POLL_INTERVAL).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::server::create_reusable_listener;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;
    use tokio::sync::oneshot;

    async fn request(addr: std::net::SocketAddr, target: &str) -> String {
        let mut stream = TcpStream::connect(addr).await.unwrap();
        let req = format!("GET {target} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n");
        stream.write_all(req.as_bytes()).await.unwrap();
        let mut buf = Vec::new();
        stream.read_to_end(&mut buf).await.unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[tokio::test]
    async fn test_serves_until_shutdown() {
        let mut config = Config::defaults().unwrap();
        config.logging.access_log = false;
        let state = Arc::new(AppState::new(config));

        let listener = create_reusable_listener("127.0.0.1:0".parse().unwrap()).unwrap();
        let addr = listener.local_addr().unwrap();

        let (tx, rx) = oneshot::channel::<()>();
        let server = tokio::spawn(start_server_loop(listener, Arc::clone(&state), async move {
            let _ = rx.await;
        }));

        let resp = request(addr, "/api/sum?a=5&b=3").await;
        assert!(resp.starts_with("HTTP/1.1 200 OK"), "{resp}");
        assert!(resp.ends_with(r#"{"result":8}"#), "{resp}");

        let resp = request(addr, "/api/divide?a=10&b=0").await;
        assert!(resp.starts_with("HTTP/1.1 400 Bad Request"), "{resp}");
        assert!(resp.ends_with(r#"{"error":"Cannot divide by zero."}"#), "{resp}");

        let resp = request(addr, "/health").await;
        assert!(resp.ends_with("OK"), "{resp}");

        tx.send(()).unwrap();
        server.await.unwrap();
        assert_eq!(state.active_connections.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_max_connections_rejects() {
        let mut config = Config::defaults().unwrap();
        config.logging.access_log = false;
        config.performance.max_connections = Some(0);
        let state = Arc::new(AppState::new(config));

        let listener = create_reusable_listener("127.0.0.1:0".parse().unwrap()).unwrap();
        let addr = listener.local_addr().unwrap();

        let (tx, rx) = oneshot::channel::<()>();
        let server = tokio::spawn(start_server_loop(listener, Arc::clone(&state), async move {
            let _ = rx.await;
        }));

        // Connection is closed without reading or answering anything
        let mut stream = TcpStream::connect(addr).await.unwrap();
        let mut buf = Vec::new();
        let read = stream.read_to_end(&mut buf).await.unwrap();
        assert_eq!(read, 0);
        assert_eq!(state.active_connections.load(Ordering::SeqCst), 0);

        tx.send(()).unwrap();
        server.await.unwrap();
    }
}

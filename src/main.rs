use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use chessboard_fen::api::router::create_router;
use chessboard_fen::api::state::AppState;
use chessboard_fen::config::AppConfig;

#[tokio::main]
async fn main() {
    let config = AppConfig::from_env();

    // `--health-check` lets a container probe the server without curl.
    if std::env::args().any(|a| a == "--health-check") {
        let code = match health_check(&config).await {
            Ok(()) => 0,
            Err(e) => {
                eprintln!("health check against {} failed: {e}", config.probe_addr());
                1
            }
        };
        std::process::exit(code);
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chessboard_fen=info,tower_http=info".into()),
        )
        .init();

    let bind_addr = config.bind_addr();
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        body_limit = config.body_limit,
        "chessboard-fen listening on {bind_addr}"
    );
    let app = create_router(AppState::new(config));

    let listener = match TcpListener::bind(&bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("failed to bind to {bind_addr}: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("server error: {e}");
        std::process::exit(1);
    }
}

/// Send a bare HTTP/1.1 `GET /health` to the configured server and require a 200.
async fn health_check(config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let addr = config.probe_addr();
    let mut stream = TcpStream::connect(&addr).await?;
    let request = format!("GET /health HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n\r\n");
    stream.write_all(request.as_bytes()).await?;

    let mut buf = vec![0u8; 1024];
    let n = stream.read(&mut buf).await?;
    let response = String::from_utf8_lossy(&buf[..n]);
    let status_line = response.lines().next().unwrap_or_default();
    if status_line.starts_with("HTTP/1.1 200") {
        Ok(())
    } else {
        Err(format!("unexpected response: {status_line}").into())
    }
}

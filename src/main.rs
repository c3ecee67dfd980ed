use bookngo::{config, routes, state};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let config = config::ConsoleConfig::from_env().expect("invalid console configuration");
    let port = config.port;
    tracing::info!(api_url = %config.api_url, "using BookNGo API");

    let state = state::AppState::new(config).expect("http client init failed");

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "bookngo console listening");
    axum::serve(listener, app).await.expect("server failed");
}

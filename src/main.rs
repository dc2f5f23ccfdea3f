use cajas::{config, routes, state};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = match config::AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };
    let port = config.port;
    tracing::info!(
        api_base_url = %config.api_base_url,
        verify_token_expiry = config.verify_token_expiry,
        "configuration loaded"
    );

    let state = state::AppState::new(config);
    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "cajas listening");
    axum::serve(listener, app).await.expect("server failed");
}

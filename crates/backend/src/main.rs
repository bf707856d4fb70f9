pub mod handlers;
pub mod routes;
pub mod shared;
pub mod usecases;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{header, Method};
use axum::middleware;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::routes::AppState;
use crate::usecases::u601_checkout::{CheckoutExecutor, SnapClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    shared::logger::initialize()?;

    let config = shared::config::load_config()?;
    tracing::info!(
        "Payment gateway: {} (sanitized: {}, 3ds: {})",
        if config.payment.is_production { "production" } else { "sandbox" },
        config.payment.is_sanitized,
        config.payment.is_3ds
    );

    let gateway = SnapClient::new(&config.payment)?;
    let state = AppState {
        checkout: Arc::new(CheckoutExecutor::new(
            Arc::new(gateway),
            config.payment.clone(),
        )),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION]);

    let app = routes::configure_routes(state)
        .fallback_service(ServeDir::new(&config.server.static_dir))
        .layer(middleware::from_fn(shared::logger::request_logger))
        .layer(cors);

    let port = config.server.port;
    let addr: SocketAddr = ([0, 0, 0, 0], port).into();

    tracing::info!("Attempting to bind server to http://{}", addr);
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => {
            tracing::info!("Server successfully bound to {}", addr);
            listener
        }
        Err(e) => {
            if e.kind() == std::io::ErrorKind::AddrInUse {
                tracing::error!(
                    "Error: Port {} is already in use. Please ensure no other process is using this port.",
                    port
                );
            } else {
                tracing::error!("Failed to bind to port {}. Error: {}", port, e);
            }
            return Err(e.into());
        }
    };

    axum::serve(listener, app).await?;

    Ok(())
}

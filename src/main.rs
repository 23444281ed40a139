//! GitHub Activity Connector - recent commit activity per user or org
//!
//! # Usage
//! ```bash
//! GITHUB_TOKEN=ghp_... gh-activity               # Start server on :8080
//! gh-activity --token ghp_... --port 9090        # Explicit flags
//! curl localhost:8080/api/github/octocat         # Fetch activity
//! ```

mod config;
mod error;
mod github;
mod models;
mod routes;

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode, header};
use axum::routing::get;
use clap::Parser;
use rust_embed::Embed;
use tokio_util::sync::CancellationToken;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::Config;
use github::GitHubClient;
use routes::AppState;

/// Embedded dashboard static files
#[derive(Embed)]
#[folder = "static/"]
struct Assets;

/// Serve embedded static files
async fn serve_static(req: Request<Body>) -> Response<Body> {
    let path = req.uri().path().trim_start_matches('/');

    // Default to index.html for root or non-file paths
    let path = if path.is_empty() || !path.contains('.') {
        "index.html"
    } else {
        path
    };

    match Assets::get(path) {
        Some(content) => {
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            Response::builder()
                .status(StatusCode::OK)
                .header(header::CONTENT_TYPE, mime.as_ref())
                .body(Body::from(content.data.into_owned()))
                .unwrap()
        }
        None => Response::builder()
            .status(StatusCode::NOT_FOUND)
            .body(Body::from("Not Found"))
            .unwrap(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let port = config.port;
    let api_base_url = config.api_base_url.clone();
    let client = match GitHubClient::new(config) {
        Ok(c) => Arc::new(c),
        Err(e) => {
            eprintln!("✗ Failed to build GitHub client: {}", e);
            std::process::exit(1);
        }
    };

    // Cancelled on shutdown; interrupts any in-flight backoff wait.
    let shutdown = CancellationToken::new();
    let state = AppState {
        client,
        shutdown: shutdown.clone(),
    };

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the router with API routes and static file serving
    let app = Router::new()
        .merge(routes::create_router(state))
        .fallback(get(serve_static))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let addr = format!("0.0.0.0:{}", port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("✗ Failed to bind to port {}: {}", port, e);
            eprintln!("  Try a different port with --port <PORT>");
            std::process::exit(1);
        }
    };

    tracing::info!(%addr, upstream = %api_base_url, "gh-activity listening");

    // Set up graceful shutdown
    let shutdown_signal = {
        let shutdown = shutdown.clone();
        async move {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to listen for Ctrl+C");
            tracing::info!("shutting down");
            shutdown.cancel();
        }
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    Ok(())
}

//! Gemini-backed chat session API

use tokio_gemini_chat_api::api;
use tokio_gemini_chat_api::core::gemini::GeminiClient;
use tokio_gemini_chat_api::core::services::MyChatService;
use tokio_gemini_chat_api::infrastructure::database::DatabaseConnection;
use tokio_gemini_chat_api::infrastructure::repositories::DbMessageRepository;

use axum::Router;
use axum::http::{HeaderValue, Method};
use di::{Injectable, ServiceCollection};
use di_axum::RouterServiceProviderExtensions;
use log::info;
use std::env;
use tokio::runtime::{Builder, Runtime};
use tower_http::cors::{Any, CorsLayer};

fn main() -> anyhow::Result<()> {
    // initialize tracing
    tracing_subscriber::fmt::init();

    let runtime: Runtime = Builder::new_multi_thread().enable_all().build()?;
    runtime.block_on(web_server_task());

    Ok(())
}

async fn web_server_task() {
    let provider = ServiceCollection::new()
        .add(DatabaseConnection::singleton())
        .add(GeminiClient::singleton())
        .add(DbMessageRepository::scoped())
        .add(MyChatService::scoped())
        .build_provider()
        .unwrap();

    // build our application with a route
    let app = Router::new()
        .nest("/api/chat", api::chat::router())
        .layer(
            CorsLayer::new()
                .allow_headers(Any)
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_origin([
                    "http://localhost:3000".parse::<HeaderValue>().unwrap(),
                    "http://localhost:5173".parse::<HeaderValue>().unwrap(),
                ]),
        )
        .with_provider(provider);

    dotenvy::dotenv().ok();
    let port = env::var("PORT").unwrap_or_else(|_| "5000".to_owned());

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .unwrap();
    info!("listening on {}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.unwrap();
    info!("Shutting down...");
}

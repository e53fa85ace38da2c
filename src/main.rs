// Pulse Social mock API server - in-memory social data layer behind HTTP

use axum::Router;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use pulse_social::{api, app_state::AppState, config::Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration
    let config = Config::from_env()?;

    // Seed stores and wire repositories and services
    let app_state = AppState::new(&config)?;

    // Build main application router
    let app = Router::new()
        .nest("/api/v1", api::router(app_state))
        .layer(CorsLayer::permissive());

    // Start server
    let addr: SocketAddr = config.server_address().parse()?;
    println!("🚀 Pulse Social mock API starting on http://{}", addr);
    println!("📋 API overview:");
    println!("  GET    /api/v1/me                              - Current demo user");
    println!("  GET    /api/v1/users                           - List users");
    println!("  GET    /api/v1/users/search?q=                 - Search users");
    println!("  GET    /api/v1/users/{{id}}/feed                 - Home feed for a viewer");
    println!("  POST   /api/v1/follows                         - Follow a user");
    println!("  DELETE /api/v1/follows/{{follower}}/{{following}}  - Unfollow");
    println!("  GET    /api/v1/posts                           - List posts, newest first");
    println!("  POST   /api/v1/posts/{{id}}/like                 - Toggle the like flag");
    println!("  GET    /api/v1/posts/{{id}}/comments             - Comments, oldest first");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

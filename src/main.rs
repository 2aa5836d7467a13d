use anyhow::Result;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};

use vehiql_marketplace::config::environment::EnvironmentConfig;
use vehiql_marketplace::database::create_pool;
use vehiql_marketplace::{build_router, state::AppState};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vehiql_marketplace=debug,tower_http=info".into()),
        )
        .init();

    info!("🚗 Vehiql Marketplace API");
    info!("=========================");

    let config = EnvironmentConfig::default();

    let pool = match create_pool(None).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Database connection failed: {}", e);
            return Err(anyhow::anyhow!("database error: {}", e));
        }
    };

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let state = AppState::new(pool, config);
    let app = build_router(state);

    info!("🌐 Listening on http://{}", addr);
    info!("🔍 Endpoints:");
    info!("   GET    /health - Health check");
    info!("   GET    /api/cars - Search car listings");
    info!("   GET    /api/cars/facets - Filter facets");
    info!("   GET    /api/cars/featured - Featured cars");
    info!("   GET    /api/cars/:id - Car detail");
    info!("   POST   /api/cars/:id/wishlist - Toggle wishlist");
    info!("   POST   /api/bookings - Book a test drive");
    info!("   POST   /api/bookings/:id/cancel - Cancel a booking");
    info!("   GET    /api/user/wishlist - Saved cars");
    info!("   GET    /api/user/bookings - Own test drives");
    info!("   GET    /api/settings/dealership - Dealership info");
    info!("   GET    /api/admin/cars - Admin inventory");
    info!("   POST   /api/admin/cars - Add a car");
    info!("   POST   /api/admin/cars/ai-scan - AI image scan");
    info!("   PATCH  /api/admin/cars/:id - Update status/featured");
    info!("   DELETE /api/admin/cars/:id - Delete a car");
    info!("   GET    /api/admin/bookings - All test drives");
    info!("   PATCH  /api/admin/bookings/:id - Update booking status");
    info!("   PUT    /api/admin/settings/hours - Save working hours");
    info!("   GET    /api/admin/users - List users");
    info!("   PATCH  /api/admin/users/:id/role - Change a user's role");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Ctrl+C received, shutting down...");
        },
        _ = terminate => {
            info!("🛑 Terminate signal received, shutting down...");
        },
    }
}

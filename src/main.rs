use axum::Router;
use clap::Parser;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cardbox::config::Config;
use cardbox::db::{create_pool, init_db, queries, AppState};
use cardbox::handlers;
use cardbox::models::CreateUser;

#[derive(Parser, Debug)]
#[command(name = "cardbox")]
#[command(about = "Debit card API for customer banking portals")]
struct Cli {
    /// Seed the database with dev data (a user with API token and sample cards)
    #[arg(long)]
    seed: bool,

    /// Delete the database on exit (dev mode only, useful for fresh starts)
    #[arg(long)]
    ephemeral: bool,
}

/// Seeds the database with dev data for manual testing.
/// Creates a user plus an active, a disabled, and an expired card.
/// Only runs in dev mode and when the database is empty.
fn seed_dev_data(state: &AppState) {
    let conn = state.db.get().expect("Failed to get db connection for seeding");

    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))
        .expect("Failed to count users");
    if count > 0 {
        tracing::info!("Database already has data, skipping seed");
        return;
    }

    let input = CreateUser {
        name: "Dev User".to_string(),
        email: "dev@cardbox.local".to_string(),
    };
    let (user, token) = queries::create_user(&conn, &input).expect("Failed to create dev user");

    let active = queries::create_debit_card(&conn, user.id, "visa")
        .expect("Failed to create dev card");

    let disabled = queries::create_debit_card(&conn, user.id, "mastercard")
        .expect("Failed to create dev card");
    queries::set_debit_card_active(&conn, user.id, disabled.id, false)
        .expect("Failed to disable dev card");

    // Expired seed card: backdating expiration_date is only possible here,
    // the API never accepts a caller-supplied expiration.
    let expired = queries::create_debit_card(&conn, user.id, "visa")
        .expect("Failed to create dev card");
    conn.execute(
        "UPDATE debit_cards SET expiration_date = created_at - 1 WHERE id = ?1",
        [expired.id],
    )
    .expect("Failed to backdate dev card");

    tracing::info!("============================================");
    tracing::info!("DEV DATA SEEDED");
    tracing::info!("User: {} ({})", user.email, user.name);
    tracing::info!("API Token: {}", token);
    tracing::info!("Cards: active={} disabled={} expired={}", active.id, disabled.id, expired.id);
    tracing::info!("============================================");
    tracing::info!("SAVE THIS TOKEN - IT WILL NOT BE SHOWN AGAIN");
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cardbox=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env();

    if config.dev_mode {
        tracing::info!("Running in DEVELOPMENT mode");
    }

    // Create database connection pool and initialize schema
    let db_pool = create_pool(&config.database_path).expect("Failed to create database pool");
    {
        let conn = db_pool.get().expect("Failed to get connection");
        init_db(&conn).expect("Failed to initialize database");
    }

    let state = AppState { db: db_pool };

    // Seed dev data if --seed flag is passed (only in dev mode)
    if cli.seed {
        if !config.dev_mode {
            tracing::warn!("--seed flag ignored: not in dev mode (set CARDBOX_ENV=dev)");
        } else {
            seed_dev_data(&state);
        }
    }

    // Build the application router
    let app = Router::new()
        .merge(handlers::router(state.clone()))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start the server
    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    let cleanup_on_exit = cli.ephemeral && config.dev_mode;
    let db_path = config.database_path.clone();

    if cleanup_on_exit {
        tracing::info!("EPHEMERAL MODE: database will be deleted on exit");
    }

    tracing::info!("Cardbox server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Failed to start server");

    if cleanup_on_exit {
        tracing::info!("Cleaning up ephemeral database...");
        if let Err(e) = std::fs::remove_file(&db_path) {
            tracing::warn!("Failed to remove {}: {}", db_path, e);
        } else {
            tracing::info!("Removed {}", db_path);
        }
        let _ = std::fs::remove_file(format!("{}-wal", db_path));
        let _ = std::fs::remove_file(format!("{}-shm", db_path));
    }
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received, stopping server...");
}

// Main entry point for the stylist server.
// Parses configuration, constructs the storage and generation handles,
// configures the Axum router, and starts the HTTP server.

use clap::Parser;
use std::sync::Arc;
use stylist_server::shutdown_signal::shutdown_signal;
use stylist_server::store::MongoWardrobeStore;
use stylist_server::stylist::generator::PollinationsGenerator;
use stylist_server::web::{AppState, create_app, create_listener};
use tracing::Level;

const DEFAULT_DATABASE: &str = "ai-stylist";

/// Command line arguments for stylist-server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct AppConfig {
    /// Hostname/IP to bind the server to.
    /// If this option is specified without value, it will default to "*", meaning the server will listen on all interfaces.
    #[arg(long, env = "STYLIST_SERVER_HOST", default_value = "localhost", num_args = 0..=1, default_missing_value = "*")]
    host: String,

    /// Port number to listen on.
    #[arg(short, long, env = "STYLIST_SERVER_PORT", default_value_t = 5000)]
    port: u16,

    /// MongoDB connection string. The database name is taken from the URI
    /// path, falling back to "ai-stylist".
    #[arg(
        long,
        env = "MONGODB_URI",
        default_value = "mongodb://localhost:27017/ai-stylist"
    )]
    mongodb_uri: String,
}

#[tokio::main]
async fn main() {
    // Parse command line args and environment variables
    let config = AppConfig::parse();

    // Initialize tracing subscriber for structured logging.
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_target(true)
        .init();

    tracing::info!("Starting stylist-server...");

    // --- Connect to MongoDB ---
    // The driver connects lazily, so this only validates the URI; the first
    // real round trip is the index bootstrap below.
    let mongo_client = mongodb::Client::with_uri_str(&config.mongodb_uri)
        .await
        .unwrap_or_else(|err| {
            tracing::error!("FATAL: Invalid MongoDB URI: {}", err);
            eprintln!("FATAL: Could not configure MongoDB client. Error: {err}. Exiting.");
            std::process::exit(1);
        });
    let db_name = database_name(&config.mongodb_uri);
    let database = mongo_client.database(&db_name);
    tracing::info!("Using MongoDB database '{}'", db_name);

    let store = MongoWardrobeStore::new(&database);
    // The server stays up even when the database is unreachable; requests
    // will surface store errors until it comes back.
    if let Err(err) = store.ensure_indexes().await {
        tracing::warn!(
            "Failed to create wardrobe indexes (is MongoDB reachable?): {}",
            err
        );
    } else {
        tracing::info!("Connected to MongoDB, wardrobe indexes ready");
    }

    let generator = PollinationsGenerator::new().unwrap_or_else(|err| {
        tracing::error!("FATAL: Failed to build HTTP client for generation: {}", err);
        eprintln!("FATAL: Could not initialize image generator. Error: {err}. Exiting.");
        std::process::exit(1);
    });

    let state = AppState {
        store: Arc::new(store),
        generator: Arc::new(generator),
    };
    let app = create_app(state);
    tracing::info!("Axum router configured.");

    // --- Start HTTP Server ---
    let listener = match create_listener(&config.host, config.port).await {
        Ok((addr, listener)) => {
            tracing::info!("Server successfully bound. Listening on {}", addr);
            listener
        }
        Err(err) => {
            tracing::error!("FATAL: Failed to bind server: {}", err);
            eprintln!("FATAL: Could not bind server. Error: {err}. Exiting.");
            std::process::exit(1);
        }
    };

    if let Err(err) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!("Server run error: {}", err);
        eprintln!("ERROR: Server shut down unexpectedly. Error: {err}");
    }

    tracing::info!("stylist-server has shut down.");
}

/// Extracts the database name from a MongoDB URI path.
fn database_name(uri: &str) -> String {
    let tail = uri.splitn(2, "://").nth(1).unwrap_or(uri);
    tail.split_once('/')
        .map(|(_, path)| path.split('?').next().unwrap_or(""))
        .filter(|name| !name.is_empty())
        .unwrap_or(DEFAULT_DATABASE)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_name_from_uri_path() {
        assert_eq!(
            database_name("mongodb://localhost:27017/wardrobe"),
            "wardrobe"
        );
        assert_eq!(
            database_name("mongodb://localhost:27017/wardrobe?retryWrites=true"),
            "wardrobe"
        );
    }

    #[test]
    fn test_database_name_falls_back_when_missing() {
        assert_eq!(database_name("mongodb://localhost:27017"), DEFAULT_DATABASE);
        assert_eq!(
            database_name("mongodb://localhost:27017/"),
            DEFAULT_DATABASE
        );
    }
}

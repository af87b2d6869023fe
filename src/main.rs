use jobpath_auth::configuration::get_configuration;
use jobpath_auth::database::{close_pool, open_pool};
use jobpath_auth::repository::{InMemoryUserRepository, PgUserRepository, UserRepository};
use jobpath_auth::startup::run;
use jobpath_auth::telemetry::init_telemetry;
use std::net::TcpListener;
use std::sync::Arc;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let configuration = get_configuration().map_err(|e| {
        eprintln!("Failed to read configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, "Configuration error")
    })?;

    init_telemetry(
        &configuration.logging.filter_directives(),
        configuration.logging.format,
    );

    if let Err(e) = configuration.validate() {
        tracing::error!(error = %e, "Invalid configuration");
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "Configuration error",
        ));
    }

    tracing::info!(
        app = %configuration.application.name,
        version = %configuration.application.version,
        debug = configuration.application.debug,
        "Starting application"
    );

    let pool = match open_pool(&configuration.database).await {
        Ok(pool) => Some(pool),
        Err(e) if configuration.application.debug => {
            tracing::warn!(
                error = %e,
                "Database unavailable; continuing with in-memory user storage (debug mode)"
            );
            None
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to initialize database");
            return Err(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "Database connection error",
            ));
        }
    };

    let users: Arc<dyn UserRepository> = match &pool {
        Some(pool) => Arc::new(PgUserRepository::new(pool.clone())),
        None => Arc::new(InMemoryUserRepository::new()),
    };

    let address = configuration.application.address();
    let listener = TcpListener::bind(&address)?;
    tracing::info!("Server listening on: {}", address);

    let server = run(listener, users, configuration)?;
    let result = server.await;

    if let Some(pool) = pool {
        close_pool(&pool).await;
    }
    tracing::info!("Server stopped");

    result
}

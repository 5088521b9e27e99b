use std::time::Instant;

use actix_web::{
    middleware::{DefaultHeaders, Logger},
    web, App, HttpServer,
};
use env_logger::Env;
use log::{debug, info, warn};

use crate::{
    config::{Config, Environment},
    db::Database,
    errors::AppError,
    routes, services,
    types::AppState,
};

// Custom result type for the application
pub type AppResult<T> = Result<T, AppError>;

// Setup logging with custom format and configuration
fn setup_logging(config: &Config) -> Result<(), AppError> {
    // Configure log level based on environment and config
    let log_level = match config.app.environment {
        Environment::Development => config.app.log_level.clone(),
        Environment::Testing => "debug,actix_web=info".to_string(),
        Environment::Production => "info,actix_web=warn".to_string(),
    };

    let env = Env::default()
        .filter_or("RUST_LOG", log_level)
        .write_style_or("RUST_LOG_STYLE", "always");

    env_logger::try_init_from_env(env)
        .map_err(|e| AppError::Logger(format!("Failed to initialize logger: {}", e)))
}

pub async fn server() -> AppResult<()> {
    // Load application configuration
    let config = Config::load()?;

    // Setup enhanced logging based on configuration
    setup_logging(&config)?;

    // Config::load runs before the logger exists, so this has to be
    // flagged again now that warnings actually go somewhere
    if config.uses_default_session_secret() {
        warn!("SESSION_SECRET not set, running with the insecure built-in default");
    }

    // Capture start time for uptime calculation
    let start_time = Instant::now();

    // Log startup information
    info!("Starting {} v{}", config.app.name, config.app.version);
    info!("Environment: {:?}", config.app.environment);
    info!(
        "Binding to {}:{} with {} workers",
        config.server.host, config.server.port, config.server.workers
    );
    info!("Short links served from {}", config.app.base_url);

    if config.app.environment == Environment::Development {
        debug!("Debug logging enabled");
    }

    // A database that cannot be reached at startup is fatal
    let db = Database::connect(&config.db)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    let enable_debug_logging = config.app.environment != Environment::Production;

    // Determine log format based on environment
    let log_format = if enable_debug_logging {
        "%a \"%r\" %s %b %T \"%{Referer}i\" \"%{User-Agent}i\" %{X-Request-ID}i"
    } else {
        "%a \"%r\" %s %b %T"
    };

    // Create clones for the closure
    let app_config = config.clone();
    let app_db = db.clone();

    // Start the HTTP server
    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(AppState {
                start_time,
                db: app_db.clone(),
                version: app_config.app.version.clone(),
            }))
            // Make the full configuration available to handlers
            .app_data(web::Data::new(app_config.clone()))
            .wrap(Logger::new(log_format))
            // Add request tracking ID
            .wrap(DefaultHeaders::new().add(("X-Request-ID", uuid::Uuid::new_v4().to_string())))
            .configure(|cfg| services::register(app_db.clone(), &app_config, cfg))
            .configure(routes::configure_routes)
    })
    .workers(config.server.workers)
    .bind((config.server.host.to_string(), config.server.port))?
    .run()
    .await?;

    db.shutdown().await;

    Ok(())
}

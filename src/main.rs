use actix_cors::Cors;
use actix_web::{web, App, HttpServer, middleware};
use relief_alloc::config::{LoggingSettings, Settings};
use relief_alloc::routes::{self, AppState};
use relief_alloc::services::{InMemoryRegistry, Registry, SeedData};
use std::sync::Arc;
use tracing::{info, error};
use tracing_subscriber::EnvFilter;

fn init_logging(logging: &LoggingSettings) {
    let filter = EnvFilter::try_new(&logging.level).unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }
}

fn build_registry(settings: &Settings) -> std::io::Result<InMemoryRegistry> {
    let Some(path) = settings.seed.path.as_deref() else {
        info!("No seed configured, starting with an empty registry");
        return Ok(InMemoryRegistry::new());
    };

    let seed = SeedData::load(path).map_err(|e| {
        error!("Failed to load seed {}: {}", path, e);
        std::io::Error::new(std::io::ErrorKind::InvalidData, e)
    })?;

    InMemoryRegistry::from_seed(seed).map_err(|e| {
        error!("Seed {} rejected: {}", path, e);
        std::io::Error::new(std::io::ErrorKind::InvalidData, e)
    })
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

    init_logging(&settings.logging.clone().with_env_overrides());

    info!("Starting relief-alloc v{}", env!("CARGO_PKG_VERSION"));

    let registry: Arc<dyn Registry> = Arc::new(build_registry(&settings)?);
    info!(
        "Registry ready: {} shelters, {} volunteers, {} tasks",
        registry.shelters().len(),
        registry.volunteers().len(),
        registry.tasks().len()
    );

    let app_state = AppState { registry };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}

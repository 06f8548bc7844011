use std::sync::Arc;

use actix_web::{App, HttpServer};
use opentelemetry::global;
use opentelemetry_sdk::propagation::TraceContextPropagator;
use opentelemetry_sdk::runtime::TokioCurrentThread;
use paperclip::actix::{web, OpenApiExt};
use tracing_actix_web::TracingLogger;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, Registry};

use bookcatalog::app_config::config_app;
use bookcatalog::books_repository::{
    BookRepository, InMemoryBookRepository, PostgresBooksRepository,
    PostgresBooksRepositoryConfig,
};
use bookcatalog::catalog::CatalogService;
use bookcatalog::reviews::{ReviewsClient, NYT_REVIEWS_URL};
use bookcatalog::settings::AppConfig;

// Based on https://github.com/LukeMathWalker/tracing-actix-web/blob/main/examples/opentelemetry/src/main.rs#L15
fn init_telemetry() {
    let app_name = "bookcatalog";

    // Start a new Jaeger trace pipeline.
    // Spans are exported in batch - recommended setup for a production application.
    global::set_text_map_propagator(TraceContextPropagator::new());
    #[allow(deprecated)]
    let tracer = opentelemetry_jaeger::new_agent_pipeline()
        .with_service_name(app_name)
        .install_batch(TokioCurrentThread)
        .expect("Failed to install OpenTelemetry tracer.");

    // Filter based on level - trace, debug, info, warn, error
    // Tunable via `RUST_LOG` env variable
    let env_filter = EnvFilter::try_from_default_env().unwrap_or(EnvFilter::new("info"));
    // Create a `tracing` layer using the Jaeger tracer
    let telemetry = tracing_opentelemetry::layer().with_tracer(tracer);
    // Create a `tracing` layer to emit spans as structured logs to stdout
    let formatting_layer = BunyanFormattingLayer::new(app_name.into(), std::io::stdout);
    // Combined them all together in a `tracing` subscriber
    let subscriber = Registry::default()
        .with(env_filter)
        .with(telemetry)
        .with(JsonStorageLayer)
        .with(formatting_layer);
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to install `tracing` subscriber.")
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    init_telemetry();

    let config = AppConfig::from_env().expect("Invalid configuration");
    tracing::info!(
        "Configured with page size {} and db connection limit {}",
        config.page_size,
        config.db.connection_limit
    );

    let books_repository: Arc<dyn BookRepository + Send + Sync> = if config.use_in_memory_db {
        Arc::new(InMemoryBookRepository::default())
    } else {
        // Fails fast if the store cannot be reached; the server only starts
        // listening after a successful liveness probe
        Arc::new(
            PostgresBooksRepository::init(PostgresBooksRepositoryConfig {
                hostname: config.db.host.clone(),
                port: config.db.port,
                username: config.db.username.clone(),
                password: config.db.password.clone(),
                database: config.db.database.clone(),
            })
            .await
            .expect("Failed to init postgres"),
        )
    };

    let port = config.port;
    println!("starting HTTP server at http://localhost:{}", port);

    HttpServer::new(move || {
        let catalog = CatalogService::new(books_repository.clone(), config.page_size);
        let reviews_client = ReviewsClient::new(NYT_REVIEWS_URL, &config.api_key)
            .expect("Failed to build reviews client");
        App::new()
            .wrap_api()
            .app_data(web::Data::new(catalog))
            .app_data(web::Data::new(reviews_client))
            .wrap(TracingLogger::default())
            .configure(config_app)
            .with_json_spec_at("/apispec/v2")
            .build()
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}

use actix_web::{web, App, HttpServer};
use gatehouse::{configure, cors_policy, static_files, AppState, GatewayConfig};
use tracing::{info, Level};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Structured logging initialisation
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .init();

    info!("Bootstrapping gateway");

    // Read once; handlers only ever see it through AppState.
    let gateway = GatewayConfig::load();
    info!("GraphQL upstream: {}", gateway.api_endpoint);
    info!("Auth upstream: {}", gateway.auth_endpoint);
    info!("Client bundle: {}", gateway.client_path.display());

    let port = gateway.port;
    let client_path = gateway.client_path.clone();
    let state = web::Data::new(AppState::new(gateway));

    let server = HttpServer::new(move || {
        App::new()
            .wrap(cors_policy())
            .wrap(TracingLogger::default())
            .app_data(state.clone())
            .configure(configure)
            .service(static_files(&client_path))
    })
    .bind(("0.0.0.0", port))?; // a port we cannot bind ends the process here

    info!("Listening on http://0.0.0.0:{port}");

    server.run().await
}

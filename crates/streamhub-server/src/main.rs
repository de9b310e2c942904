// streamhub Server
//
// Main server binary: loads configuration, initializes logging, wires
// the session service over the user store, and serves the HTTP API.

mod logging;

use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use anyhow::Result;
use log::info;
use std::sync::Arc;
use streamhub_api::routes;
use streamhub_auth::{InMemoryUserRepo, SessionService, TokenCodec, UserRepository};
use streamhub_configs::ServerConfig;

#[actix_web::main]
async fn main() -> Result<()> {
    // Load configuration
    let mut config = match ServerConfig::from_file("config.toml") {
        Ok(cfg) => cfg,
        Err(_) => {
            eprintln!("Warning: config.toml not found, using defaults");
            ServerConfig::default()
        },
    };
    config.apply_env_overrides();
    config.validate()?;

    // Initialize logging
    logging::init_logging(&config.logging)?;

    info!("Starting streamhub server v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration loaded: host={}, port={}",
        config.server.host, config.server.port
    );

    // Wire the auth core: store, codec, session service. Secrets and
    // lifetimes flow in from config here and nowhere else.
    let repo: Arc<dyn UserRepository> = Arc::new(InMemoryUserRepo::new());
    let codec = TokenCodec::new(&config.auth);
    let sessions = Arc::new(SessionService::new(repo, codec, config.auth.clone()));
    let auth_settings = config.auth.clone();
    let cors_origin = config.server.cors_origin.clone();

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Starting HTTP server on {}", bind_addr);
    info!(
        "Endpoints: POST /api/v1/users/{{register,login,token,logout}}, \
        GET /api/v1/users/me"
    );

    HttpServer::new(move || {
        // Credentialed CORS requires a pinned origin; without one, stay
        // open but credential-less.
        let cors = match cors_origin.as_deref() {
            Some(origin) => Cors::default()
                .allowed_origin(origin)
                .allow_any_method()
                .allow_any_header()
                .supports_credentials()
                .max_age(3600),
            None => Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600),
        };

        let sessions = sessions.clone();
        App::new()
            .wrap(middleware::Logger::default())
            .wrap(cors)
            .app_data(web::Data::new(sessions.clone()))
            .app_data(web::Data::new(auth_settings.clone()))
            .configure(|cfg| routes::configure_routes(cfg, &sessions))
    })
    .bind(&bind_addr)?
    .run()
    .await?;

    Ok(())
}

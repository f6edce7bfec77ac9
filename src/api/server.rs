// API server implementation using actix-web

use std::env;
use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use anyhow::{Context, Result};

use crate::api::handlers::AppState;
use crate::api::{middleware, routes};
use crate::pipeline::{Pipeline, CACHE_TTL};
use crate::steam::SteamClient;

pub struct ApiServer {
    pub host: String,
    pub port: u16,
    pub allowed_origins: String,
    steam_key: String,
}

impl ApiServer {
    /// Create server from environment variables. The Steam key is the one
    /// hard requirement; without it the process must not come up.
    pub fn from_env() -> Result<Self> {
        crate::util::env::init_env();

        let host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("API_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .context("Invalid API_PORT")?;

        let steam_key = crate::util::env::env_req("STEAM_SECRET_KEY")?;

        let allowed_origins =
            env::var("ALLOWED_ORIGINS").unwrap_or_else(|_| "http://localhost:3000".to_string());

        Ok(Self {
            host,
            port,
            allowed_origins,
            steam_key,
        })
    }

    /// Start the HTTP server.
    pub async fn run(self) -> Result<()> {
        let bind_addr = format!("{}:{}", self.host, self.port);

        tracing::info!(
            host = %self.host,
            port = %self.port,
            "Starting achboard API server"
        );

        let pipeline = Pipeline::new(Arc::new(SteamClient::new(self.steam_key.clone())), CACHE_TTL);
        let state = web::Data::new(AppState { pipeline });
        let allowed_origins = self.allowed_origins.clone();

        HttpServer::new(move || {
            let (logger, compress) = middleware::setup_middleware();
            let cors = middleware::setup_cors(&allowed_origins);

            App::new()
                .app_data(state.clone())
                .wrap(logger)
                .wrap(compress)
                .wrap(cors)
                .configure(routes::configure_routes)
        })
        .bind(&bind_addr)
        .with_context(|| format!("Failed to bind to {}", bind_addr))?
        .run()
        .await
        .context("HTTP server error")?;

        Ok(())
    }
}

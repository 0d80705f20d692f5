//! # HTTP Server
//!
//! Combines the health and cat routers behind a request log and CORS.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::Router;
use tokio::net::TcpListener;
use tower::ServiceBuilder;

use super::cat_routes::{cat_routes, CatState};
use super::config::HttpServerConfig;
use super::health_routes::health_routes;
use crate::observability::Logger;
use crate::service::CatService;

/// HTTP server for the cat API
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server with default configuration
    pub fn new(service: CatService) -> Self {
        Self::with_config(HttpServerConfig::default(), service)
    }

    /// Create a server with custom configuration
    pub fn with_config(config: HttpServerConfig, service: CatService) -> Self {
        let router = Self::build_router(&config, service);
        Self { config, router }
    }

    /// Build the combined router with all endpoints
    fn build_router(config: &HttpServerConfig, service: CatService) -> Router {
        let cat_state = Arc::new(CatState::new(service));

        Router::new()
            .merge(health_routes(cat_state.clone()))
            .merge(cat_routes(cat_state))
            .layer(
                ServiceBuilder::new()
                    .layer(middleware::from_fn(log_request))
                    .layer(config.cors_layer()),
            )
    }

    /// Address the server binds to
    pub fn socket_addr(&self) -> io::Result<SocketAddr> {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind and serve until the process is stopped
    pub async fn start(self) -> Result<(), io::Error> {
        let addr = self.config.socket_addr()?;
        let listener = TcpListener::bind(addr).await?;
        Logger::info("SERVER_STARTING", &[("addr", addr.to_string().as_str())]);

        axum::serve(listener, self.router).await?;
        Ok(())
    }
}

/// One TRACE line per request
async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    Logger::trace(
        "REQUEST",
        &[
            ("method", method.as_str()),
            ("path", path.as_str()),
            ("status", response.status().as_str()),
        ],
    );
    response
}

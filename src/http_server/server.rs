//! # HTTP Server
//!
//! Combines the student, evaluation and health routers into one Axum app.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::observability::{log_event_with_fields, Event};

use super::config::HttpServerConfig;
use super::evaluation_routes::evaluation_routes;
use super::observability_routes::health_routes;
use super::state::ClassroomState;
use super::student_routes::student_routes;

/// HTTP server for the classroom service
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server answering from `state`
    pub fn with_config(config: HttpServerConfig, state: ClassroomState) -> Self {
        let router = Self::build_router(&config, Arc::new(state));
        Self { config, router }
    }

    /// Build the combined router with all endpoints
    fn build_router(config: &HttpServerConfig, state: Arc<ClassroomState>) -> Router {
        let cors = if config.cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        Router::new()
            .merge(health_routes())
            .merge(student_routes(state.clone()))
            .merge(evaluation_routes(state))
            .layer(ServiceBuilder::new().layer(cors))
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind and serve until the process exits
    pub async fn start(self) -> io::Result<()> {
        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.port)
            .parse()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, format!("{}", e)))?;

        let listener = TcpListener::bind(addr).await?;
        log_event_with_fields(Event::Serving, &[("addr", &addr.to_string())]);

        axum::serve(listener, self.router).await
    }
}

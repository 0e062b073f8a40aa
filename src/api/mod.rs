mod error;
mod handlers;
mod types;

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post, put};
use log::info;
use tower_http::trace::TraceLayer;

use crate::core::SweeperError;
use crate::service::SweeperService;

pub use error::ApiError;
pub use types::{ChartRequest, CleanRequest, ExportQuery};

pub struct SweeperApi {
    service: Arc<SweeperService>,
}

impl SweeperApi {
    pub fn new(service: SweeperService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    pub fn router(&self) -> Router {
        let body_limit = self.service.config().server.max_upload_bytes;
        Router::new()
            .route("/health", get(handlers::health))
            .route(
                "/api/v1/files",
                get(handlers::list_files).delete(handlers::reset),
            )
            .route("/api/v1/files/{name}", put(handlers::upload))
            .route("/api/v1/files/{name}/summary", get(handlers::summary))
            .route("/api/v1/files/{name}/clean", post(handlers::clean))
            .route("/api/v1/files/{name}/chart", post(handlers::chart))
            .route("/api/v1/files/{name}/export", get(handlers::export))
            .route("/api/v1/export", get(handlers::export_all))
            .layer(DefaultBodyLimit::max(body_limit))
            .layer(TraceLayer::new_for_http())
            .with_state(self.service.clone())
    }

    pub async fn serve(self, addr: &str) -> Result<(), SweeperError> {
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| SweeperError::IoError(format!("binding to {addr}: {e}")))?;
        info!("listening on {addr}");
        axum::serve(listener, self.router())
            .await
            .map_err(|e| SweeperError::IoError(format!("serving: {e}")))?;
        Ok(())
    }
}

use crate::error::ConfigError;
use crate::models::CurrentMoment;
use crate::services::file_reporter::{render_listing, FileReporter};
use anyhow::{Context, Result};
use axum::{extract::State, http::header, response::IntoResponse, routing::get, Router};
use std::sync::Arc;
use tracing::{error, info};

pub const DEFAULT_ROUTE: &str = "/radar.php";

/// Configuration for serving the listing over HTTP
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: String,
    pub port: u16,
    pub route: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1".to_string(),
            port: 3000,
            route: DEFAULT_ROUTE.to_string(),
        }
    }
}

impl ServerConfig {
    /// Routes are literal paths: captures and wildcards are refused
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.route.starts_with('/') || self.route.contains(['*', ':', '{', '}']) {
            return Err(ConfigError::InvalidRoute(self.route.clone()));
        }
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.addr, self.port)
    }
}

/// Build the router. The listing is served on `route` and on `/`.
/// `route` must have passed [`ServerConfig::validate`].
pub fn router(reporter: Arc<FileReporter>, route: &str) -> Router {
    let mut router = Router::new().route("/", get(listing));
    if route != "/" {
        router = router.route(route, get(listing));
    }
    router.with_state(reporter)
}

/// Every request reads the clock and the directory afresh
async fn listing(State(reporter): State<Arc<FileReporter>>) -> impl IntoResponse {
    let moment = CurrentMoment::now_local();
    let body = tokio::task::spawn_blocking(move || render_listing(&reporter.report(&moment)))
        .await
        .unwrap_or_else(|e| {
            error!("Listing task failed, serving empty listing: {}", e);
            String::new()
        });

    ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], body)
}

/// Bind and serve until the process is stopped
pub async fn serve(reporter: FileReporter, config: ServerConfig) -> Result<()> {
    config.validate()?;

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind TCP listener on {}", address))?;

    info!(
        "Serving listing of {:?} at http://{}{}",
        reporter.directory(),
        address,
        config.route
    );

    let app = router(Arc::new(reporter), &config.route);
    axum::serve(listener, app).await.context("HTTP server failed")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::file_reporter::{FileReporterConfig, ListingOrder};
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use std::fs::File;
    use tempfile::tempdir;
    use tower::ServiceExt;

    fn reporter_for(directory: std::path::PathBuf) -> Arc<FileReporter> {
        Arc::new(FileReporter::new(FileReporterConfig {
            directory,
            order: ListingOrder::Lexical,
        }))
    }

    async fn get_body(app: Router, uri: &str) -> (StatusCode, Option<String>, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .map(|v| v.to_str().unwrap().to_string());
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, content_type, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_listing_route_serves_plain_text() {
        let dir = tempdir().unwrap();
        File::create(dir.path().join("b.mp4")).unwrap();
        File::create(dir.path().join("a.mp4")).unwrap();
        File::create(dir.path().join("0101_0000.webp")).unwrap();

        let moment = CurrentMoment::now_local();
        let current = format!("{}_{}00.webp", moment.month_day, moment.hour);
        File::create(dir.path().join(&current)).unwrap();

        let app = router(reporter_for(dir.path().to_path_buf()), DEFAULT_ROUTE);
        let (status, content_type, body) = get_body(app, DEFAULT_ROUTE).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type.as_deref(), Some("text/plain; charset=utf-8"));
        // The hour may roll over between file creation and the request
        assert!(body.starts_with("a.mp4\nb.mp4\n"));
        if CurrentMoment::now_local() == moment {
            assert!(body.contains(&current));
        }
        if moment.month_day != "0101" || moment.hour != "00" {
            assert!(!body.contains("0101_0000.webp"));
        }
    }

    #[tokio::test]
    async fn test_root_route_serves_listing() {
        let dir = tempdir().unwrap();
        File::create(dir.path().join("clip.mp4")).unwrap();

        let app = router(reporter_for(dir.path().to_path_buf()), "/listing");
        let (status, _, body) = get_body(app, "/").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "clip.mp4\n");
    }

    #[tokio::test]
    async fn test_missing_directory_serves_empty_body() {
        let dir = tempdir().unwrap();
        let app = router(reporter_for(dir.path().join("gone")), DEFAULT_ROUTE);
        let (status, content_type, body) = get_body(app, DEFAULT_ROUTE).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type.as_deref(), Some("text/plain; charset=utf-8"));
        assert_eq!(body, "");
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let dir = tempdir().unwrap();
        let app = router(reporter_for(dir.path().to_path_buf()), DEFAULT_ROUTE);
        let (status, _, _) = get_body(app, "/elsewhere").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_server_config_validation() {
        assert!(ServerConfig::default().validate().is_ok());
        let config = ServerConfig {
            route: "radar.php".to_string(),
            ..ServerConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidRoute("radar.php".to_string()))
        );
        for route in ["/*", "/*rest", "/:name", "/{file}", "/radar}"] {
            let config = ServerConfig {
                route: route.to_string(),
                ..ServerConfig::default()
            };
            assert_eq!(
                config.validate(),
                Err(ConfigError::InvalidRoute(route.to_string()))
            );
        }
        assert_eq!(ServerConfig::default().bind_address(), "127.0.0.1:3000");
    }
}

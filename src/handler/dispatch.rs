//! Request dispatch module
//!
//! Each request is handled independently and statelessly: the path is
//! looked up in the route table, the bound template is rendered, and
//! the outcome maps onto 200/404/500.

use crate::config::AppState;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::{Body as _, Bytes};
use hyper::{Method, Request, Response, Version};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
    remote_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let http_version = version_string(req.version());
    let referer = header_value(&req, "referer");
    let user_agent = header_value(&req, "user-agent");

    let response = respond(&method, &path, &state).await;

    if state.config.logging.access_log {
        let mut entry = AccessLogEntry::new(remote_addr.ip().to_string(), method.to_string(), path);
        entry.http_version = http_version;
        entry.status = response.status().as_u16();
        entry.body_bytes = response.body().size_hint().exact().unwrap_or(0);
        entry.referer = referer;
        entry.user_agent = user_agent;
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Gate on method, then dispatch GET/HEAD to the route table
async fn respond(method: &Method, path: &str, state: &AppState) -> Response<Full<Bytes>> {
    match *method {
        Method::GET => dispatch(path, false, state).await,
        Method::HEAD => dispatch(path, true, state).await,
        Method::OPTIONS => http::build_options_response(),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            http::build_405_response()
        }
    }
}

/// Resolve a path against the route table and render its template
///
/// Routing miss is a 404; a matched route whose template cannot be
/// located or rendered is a 500.
async fn dispatch(path: &str, is_head: bool, state: &AppState) -> Response<Full<Bytes>> {
    let Some(template_id) = state.router.lookup(path) else {
        return http::build_404_response();
    };

    if state.config.server.debug {
        logger::log_route_resolved(path, template_id);
    }

    match state.templates.render(template_id).await {
        Ok(document) => http::build_html_response(document, is_head),
        Err(err) => {
            logger::log_template_error(path, &err);
            http::build_500_response()
        }
    }
}

fn version_string(version: Version) -> String {
    match version {
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        _ => "1.1",
    }
    .to_string()
}

fn header_value(req: &Request<hyper::body::Incoming>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        Config, LoggingConfig, PerformanceConfig, ServerConfig, TemplatesConfig,
    };
    use crate::routing::TemplateRouter;
    use crate::template::TemplateStore;
    use http_body_util::BodyExt;
    use std::path::{Path, PathBuf};

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("dispatch_test_{}_{}", name, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn test_state(templates_dir: &Path) -> AppState {
        let config = Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                workers: None,
                debug: false,
            },
            templates: TemplatesConfig {
                dir: templates_dir.display().to_string(),
            },
            routes: Vec::new(),
            logging: LoggingConfig {
                access_log: false,
                access_log_format: "combined".to_string(),
                access_log_file: None,
                error_log_file: None,
            },
            performance: PerformanceConfig {
                keep_alive_timeout: 75,
                read_timeout: 30,
                write_timeout: 30,
                max_connections: None,
            },
        };

        let mut router = TemplateRouter::new();
        router.register("/", "index").unwrap();
        router.register("/showcase", "showcase").unwrap();

        AppState::new(config, router, TemplateStore::new(templates_dir))
    }

    async fn body_string(response: Response<Full<Bytes>>) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_get_root_renders_index() {
        let dir = scratch_dir("root");
        std::fs::write(dir.join("index.html"), "<h1>Welcome</h1>").unwrap();
        std::fs::write(dir.join("showcase.html"), "<h1>Showcase</h1>").unwrap();
        let state = test_state(&dir);

        let response = respond(&Method::GET, "/", &state).await;
        assert_eq!(response.status(), 200);
        let body = body_string(response).await;
        assert!(body.contains("<h1>Welcome</h1>"));
    }

    #[tokio::test]
    async fn test_get_showcase_renders_showcase() {
        let dir = scratch_dir("showcase");
        std::fs::write(dir.join("index.html"), "<h1>Welcome</h1>").unwrap();
        std::fs::write(dir.join("showcase.html"), "<h1>Showcase</h1>").unwrap();
        let state = test_state(&dir);

        let response = respond(&Method::GET, "/showcase", &state).await;
        assert_eq!(response.status(), 200);
        let body = body_string(response).await;
        assert!(body.contains("<h1>Showcase</h1>"));
    }

    #[tokio::test]
    async fn test_registered_routes_serve_nonempty_bodies() {
        let dir = scratch_dir("nonempty");
        std::fs::write(dir.join("index.html"), "<h1>Welcome</h1>").unwrap();
        std::fs::write(dir.join("showcase.html"), "<h1>Showcase</h1>").unwrap();
        let state = test_state(&dir);

        for (path, _) in state.router.iter() {
            let response = dispatch(path, false, &state).await;
            assert_eq!(response.status(), 200, "path: {path}");
            let body = body_string(response).await;
            assert!(!body.is_empty(), "path: {path}");
        }
    }

    #[tokio::test]
    async fn test_unmapped_path_is_404() {
        let dir = scratch_dir("miss");
        let state = test_state(&dir);

        let response = respond(&Method::GET, "/missing", &state).await;
        assert_eq!(response.status(), 404);
        let body = body_string(response).await;
        assert!(body.contains("404"));
    }

    #[tokio::test]
    async fn test_deleted_template_is_500() {
        let dir = scratch_dir("deleted");
        // Route for /showcase exists, but its backing template does not
        let state = test_state(&dir);

        let response = respond(&Method::GET, "/showcase", &state).await;
        assert_eq!(response.status(), 500);
    }

    #[tokio::test]
    async fn test_head_returns_empty_body_with_status() {
        let dir = scratch_dir("head");
        std::fs::write(dir.join("index.html"), "<h1>Welcome</h1>").unwrap();
        let state = test_state(&dir);

        let response = respond(&Method::HEAD, "/", &state).await;
        assert_eq!(response.status(), 200);
        let body = body_string(response).await;
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_post_is_405() {
        let dir = scratch_dir("post");
        let state = test_state(&dir);

        let response = respond(&Method::POST, "/", &state).await;
        assert_eq!(response.status(), 405);
        assert_eq!(
            response.headers().get("Allow").unwrap(),
            "GET, HEAD, OPTIONS"
        );
    }

    #[tokio::test]
    async fn test_options_is_204() {
        let dir = scratch_dir("options");
        let state = test_state(&dir);

        let response = respond(&Method::OPTIONS, "/", &state).await;
        assert_eq!(response.status(), 204);
    }
}

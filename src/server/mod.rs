//! HTTP routing layer
//!
//! Listing and detail routes are answered from the content directory on
//! every request; everything else is served from the public directory.

use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::content::{self, ContentError};
use crate::generator::sitemap;
use crate::Site;

/// Query string of listing requests
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub category: Option<String>,
    pub page: Option<String>,
}

impl ListParams {
    /// Requested page; missing or unparsable means page 1
    pub fn page(&self) -> usize {
        self.page
            .as_deref()
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(1)
    }
}

/// Errors surfaced to HTTP clients
enum ApiError {
    Content(ContentError),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Content(e) if e.is_not_found() => (StatusCode::NOT_FOUND, e.to_string()),
            ApiError::Content(e) => {
                tracing::error!("Request failed: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
            ApiError::Internal(message) => {
                tracing::error!("Request failed: {}", message);
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

/// Run synchronous content work off the async worker threads
async fn blocking<T, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> content::Result<T> + Send + 'static,
    T: Send + 'static,
{
    match tokio::task::spawn_blocking(f).await {
        Ok(result) => result.map_err(ApiError::Content),
        Err(e) => Err(ApiError::Internal(e.to_string())),
    }
}

/// Build the router for a site
///
/// Collection routes must have passed `SiteConfig::validate`.
pub fn router(site: Arc<Site>) -> Router {
    let mut app: Router<Arc<Site>> = Router::new()
        .route("/api/:collection", get(list_handler))
        .route("/api/:collection/:slug", get(post_json_handler))
        .route("/sitemap.xml", get(sitemap_handler));

    for collection in &site.config.collections {
        let name = collection.name.clone();
        let path = format!("/{}/:slug", collection.route.trim_matches('/'))
            .replace("//", "/");
        app = app.route(
            &path,
            get(
                move |State(site): State<Arc<Site>>, Path(slug): Path<String>| {
                    post_html_handler(site, name.clone(), slug)
                },
            ),
        );
    }

    app.fallback_service(ServeDir::new(&site.public_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(site)
}

/// Start the server
pub async fn start(site: &Site, ip: &str, port: u16) -> Result<()> {
    site.config.validate()?;
    let app = router(Arc::new(site.clone()));

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// `GET /api/{collection}?category=..&page=..`
async fn list_handler(
    State(site): State<Arc<Site>>,
    Path(collection): Path<String>,
    Query(params): Query<ListParams>,
) -> Response {
    let page = params.page();
    let result =
        blocking(move || site.listing(&collection, params.category.as_deref(), page)).await;

    match result {
        Ok(view) => Json(view).into_response(),
        Err(e) => e.into_response(),
    }
}

/// `GET /api/{collection}/{slug}`
async fn post_json_handler(
    State(site): State<Arc<Site>>,
    Path((collection, slug)): Path<(String, String)>,
) -> Response {
    match blocking(move || site.render_post(&collection, &slug)).await {
        Ok(post) => Json(post).into_response(),
        Err(e) => e.into_response(),
    }
}

/// `GET /{route}/{slug}`
async fn post_html_handler(site: Arc<Site>, collection: String, slug: String) -> Response {
    match blocking(move || site.render_post(&collection, &slug)).await {
        Ok(post) => Html(post.html()).into_response(),
        Err(ApiError::Content(e)) if e.is_not_found() => {
            (StatusCode::NOT_FOUND, Html("<h1>404 Not Found</h1>")).into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// `GET /sitemap.xml`
async fn sitemap_handler(State(site): State<Arc<Site>>) -> Response {
    let result = blocking(move || Ok(sitemap::render(&sitemap::collect_entries(&site)))).await;

    match result {
        Ok(xml) => ([(header::CONTENT_TYPE, "application/xml")], xml).into_response(),
        Err(e) => e.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use std::fs;
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn site() -> (TempDir, Arc<Site>) {
        let dir = TempDir::new().unwrap();
        let posts = dir.path().join("posts");
        fs::create_dir_all(&posts).unwrap();
        fs::write(
            posts.join("january.md"),
            "---\ntitle: January\ndate: 2024-01-05\ncategory: Design Patterns\n---\nOld",
        )
        .unwrap();
        fs::write(
            posts.join("march.md"),
            "---\ntitle: March\ndate: 2024-03-01\n---\n```json\n{\"a\":1}\n```\n",
        )
        .unwrap();

        let site = Site::new(dir.path()).unwrap();
        (dir, Arc::new(site))
    }

    async fn request(app: Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[test]
    fn test_list_params_page() {
        let params = ListParams {
            category: None,
            page: Some("abc".to_string()),
        };
        assert_eq!(params.page(), 1);
        assert_eq!(ListParams::default().page(), 1);
        let params = ListParams {
            category: None,
            page: Some(" 3 ".to_string()),
        };
        assert_eq!(params.page(), 3);
    }

    #[tokio::test]
    async fn test_list_endpoint() {
        let (_dir, site) = site();
        let (status, body) = request(router(site), "/api/posts").await;
        assert_eq!(status, StatusCode::OK);

        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["posts"][0]["slug"], "march");
        assert_eq!(value["posts"][1]["slug"], "january");
        assert_eq!(value["totalPages"], 1);
        assert_eq!(value["categories"][0], "Design Patterns");
    }

    #[tokio::test]
    async fn test_list_endpoint_filtered() {
        let (_dir, site) = site();
        let (status, body) = request(
            router(site.clone()),
            "/api/posts?category=design%20patterns&page=1",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["posts"].as_array().unwrap().len(), 1);
        assert_eq!(value["category"], "design patterns");

        let (_, body) = request(router(site), "/api/posts?page=7").await;
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert!(value["posts"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_post_endpoints() {
        let (_dir, site) = site();

        let (status, body) = request(router(site.clone()), "/api/posts/march").await;
        assert_eq!(status, StatusCode::OK);
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["title"], "March");
        assert_eq!(value["document"]["codeBlocks"][0]["label"], "JSON");

        let (status, body) = request(router(site.clone()), "/posts/march").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#"data-language="json""#));
    }

    #[tokio::test]
    async fn test_not_found() {
        let (_dir, site) = site();

        let (status, body) = request(router(site.clone()), "/api/posts/does-not-exist").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("error"));

        let (status, _) = request(router(site.clone()), "/posts/does-not-exist").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = request(router(site), "/api/patterns").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_sitemap_endpoint() {
        let (_dir, site) = site();
        let (status, body) = request(router(site), "/sitemap.xml").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<loc>http://example.com/posts/march</loc>"));
    }
}

//! HTTP server rendering cheatsheets on request

use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::SiteConfig;
use crate::content::{CheatsheetSummary, ContentLoader};
use crate::query::{categories, ListingQuery};
use crate::templates::TemplateRenderer;
use crate::Cheatsheets;

/// Server state
struct ServerState {
    config: SiteConfig,
    loader: ContentLoader,
    templates: TemplateRenderer,
}

/// Start the server
pub async fn start(app: &Cheatsheets, ip: &str, port: u16, open: bool) -> Result<()> {
    let state = Arc::new(ServerState {
        config: app.config.clone(),
        loader: app.loader(),
        templates: TemplateRenderer::new()?,
    });

    let router = router(state);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    let url = format!("http://{}:{}", ip, port);
    println!("Server running at {}", url);
    println!("Serving cheatsheets from {:?}", app.content_dir);
    println!("Press Ctrl+C to stop.");

    if open {
        if let Err(e) = open_browser(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

fn router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/api/cheatsheets", get(api_cheatsheets_handler))
        .route("/api/categories", get(api_categories_handler))
        .route("/cheatsheet/:slug", get(cheatsheet_handler))
        .route("/cheatsheet/:slug/", get(cheatsheet_handler))
        .fallback(fallback_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Listing on the blocking pool; loading reads and renders files
async fn listing(state: &Arc<ServerState>) -> Vec<CheatsheetSummary> {
    let state = Arc::clone(state);
    match tokio::task::spawn_blocking(move || state.loader.list_documents()).await {
        Ok(listing) => listing,
        Err(e) => {
            tracing::error!("Listing task failed: {}", e);
            Vec::new()
        }
    }
}

/// HTML listing page
async fn index_handler(
    State(state): State<Arc<ServerState>>,
    Query(query): Query<ListingQuery>,
) -> Response {
    let listing = listing(&state).await;
    match state.templates.render_listing(&state.config, &listing, &query) {
        Ok(html) => Html(html).into_response(),
        Err(e) => server_error(e),
    }
}

/// JSON listing, filtered by `q` and `category`
async fn api_cheatsheets_handler(
    State(state): State<Arc<ServerState>>,
    Query(query): Query<ListingQuery>,
) -> Json<Vec<CheatsheetSummary>> {
    let listing = listing(&state).await;
    Json(query.filter(&listing).into_iter().cloned().collect())
}

/// JSON category list, `All` first
async fn api_categories_handler(State(state): State<Arc<ServerState>>) -> Json<Vec<String>> {
    let listing = listing(&state).await;
    Json(categories(&listing))
}

/// One rendered cheatsheet, or a 404 page
async fn cheatsheet_handler(
    State(state): State<Arc<ServerState>>,
    Path(slug): Path<String>,
) -> Response {
    let loaded = {
        let state = Arc::clone(&state);
        let slug = slug.clone();
        tokio::task::spawn_blocking(move || state.loader.load_document(&slug)).await
    };

    let sheet = match loaded {
        Ok(Some(sheet)) => sheet,
        Ok(None) => return not_found(&state, &slug),
        Err(e) => {
            tracing::error!("Load task for {} failed: {}", slug, e);
            return (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response();
        }
    };

    match state.templates.render_cheatsheet(&state.config, &sheet) {
        Ok(html) => Html(html).into_response(),
        Err(e) => server_error(e),
    }
}

async fn fallback_handler() -> Response {
    (StatusCode::NOT_FOUND, "Not found").into_response()
}

fn not_found(state: &ServerState, slug: &str) -> Response {
    match state.templates.render_not_found(&state.config, slug) {
        Ok(html) => (StatusCode::NOT_FOUND, Html(html)).into_response(),
        Err(e) => server_error(e),
    }
}

fn server_error(e: anyhow::Error) -> Response {
    tracing::error!("Failed to render page: {:#}", e);
    (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response()
}

/// Open a URL in the default browser
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(url).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(url).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/c", "start", url])
            .spawn()?;
    }

    Ok(())
}

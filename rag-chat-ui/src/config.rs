use std::sync::OnceLock;

/// Port the pipeline server listens on when run locally.
pub const LOCAL_API_PORT: &str = "5000";

/// Build-time override, e.g. `RAG_API_BASE=https://rag.example.com dx build`.
const API_BASE_OVERRIDE: Option<&str> = option_env!("RAG_API_BASE");

static API_BASE_CACHE: OnceLock<String> = OnceLock::new();

/// Pick the API base URL.
/// - An explicit override always wins (trailing slash removed)
/// - A page on localhost served from another port (the dev server) talks to
///   the pipeline server on [`LOCAL_API_PORT`]
/// - Otherwise use the page's own origin, so paths stay relative
pub fn resolve_api_base(override_base: Option<&str>, hostname: &str, port: &str) -> String {
    if let Some(base) = override_base.map(str::trim).filter(|b| !b.is_empty()) {
        return base.trim_end_matches('/').to_string();
    }

    let local = hostname == "localhost" || hostname == "127.0.0.1";
    if local && port != LOCAL_API_PORT {
        format!("http://{hostname}:{LOCAL_API_PORT}")
    } else {
        String::new()
    }
}

fn detect_api_base() -> String {
    let location = web_sys::window().map(|w| w.location());
    let hostname = location
        .as_ref()
        .and_then(|l| l.hostname().ok())
        .unwrap_or_default();
    let port = location
        .as_ref()
        .and_then(|l| l.port().ok())
        .unwrap_or_default();

    let base = resolve_api_base(API_BASE_OVERRIDE, &hostname, &port);
    dioxus_logger::tracing::info!("Using pipeline API base {:?}", base);
    base
}

/// Cached API base, computed at first use.
pub fn api_base() -> &'static str {
    API_BASE_CACHE.get_or_init(detect_api_base).as_str()
}

pub fn endpoint(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

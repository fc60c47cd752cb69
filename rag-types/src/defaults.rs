//! Fixed values the console ships with.

/// Interval between `GET /status` polls.
pub const STATUS_POLL_INTERVAL_MS: u32 = 5_000;

/// Seed documents the pipeline indexes when nothing else is given.
pub const DEFAULT_URLS: [&str; 3] = [
    "https://lilianweng.github.io/posts/2023-06-23-agent/",
    "https://lilianweng.github.io/posts/2023-03-15-prompt-engineering/",
    "https://lilianweng.github.io/posts/2023-10-25-adv-attack-llm/",
];

pub const QUERY_ERROR_FALLBACK: &str = "An error occurred";
pub const QUERY_TRANSPORT_FALLBACK: &str = "Failed to process query";
pub const INITIALIZE_ERROR_FALLBACK: &str = "Failed to initialize pipeline";
pub const INITIALIZE_SUCCESS_MESSAGE: &str = "Pipeline initialized successfully";
pub const EMPTY_URLS_MESSAGE: &str = "Please enter at least one URL";
pub const CLEAR_CONFIRMATION: &str = "Are you sure you want to clear the chat history?";

pub const INITIALIZE_LABEL_IDLE: &str = "Initialize Pipeline";
pub const INITIALIZE_LABEL_BUSY: &str = "Initializing...";

/// Prefill for the settings textarea, one URL per line.
pub fn default_urls_text() -> String {
    DEFAULT_URLS.join("\n")
}

//! Constants for backend endpoints, timeouts and response limits

/// Backend used when no base URL is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Endpoint paths
pub const API_DOCS_PATH: &str = "/v3/api-docs";
pub const SWAGGER_UI_PATH: &str = "/swagger-ui/index.html";
pub const SIMPLE_CHAT_PATH: &str = "/api/v1/simple-chat";
pub const SESSION_CHAT_PATH: &str = "/api/v1/chat";

/// Timeouts in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 35;
pub const DEFAULT_DOCS_TIMEOUT_SECS: u64 = 20;

/// Documentation answer limits
pub const METHOD_PREVIEW_LIMIT: usize = 12;
pub const PATHS_PREVIEW_LIMIT: usize = 20;
pub const RESPONSE_CODES_PREVIEW_LIMIT: usize = 6;

/// Chat limits
pub const MAX_CHAT_LINKS: usize = 8;
pub const MAX_CONTEXT_CHARS: usize = 3000;

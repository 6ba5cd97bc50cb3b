pub mod chat;
pub mod config;
pub mod constants;
pub mod docs;
pub mod openapi;
pub mod search;
pub mod service;

pub use config::AssistantConfig;
pub use service::ApiDocsService;

//! # Chat Module
//!
//! Client for the chat backend's basic and session conversations, the
//! user-facing error taxonomy, and post-processing of session replies
//! against the loaded operation index.

pub mod client;
pub mod error;
pub mod outputs;
pub mod reply;
pub mod tools;

pub use client::{ChatClient, ChatLink, ChatSession, SessionReply};
pub use error::ChatError;
pub use tools::ChatTools;

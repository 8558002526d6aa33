//! Mate library
//!
//! Multi-platform music search, chat completion with provider fallback, and
//! lyrics lookup, exposed through [`service::MusicService`].

pub mod cli;
pub mod config;
pub mod fallback;
pub mod llm;
pub mod logging;
pub mod lyrics;
pub mod schema;
pub mod search;
pub mod service;
pub mod transport;

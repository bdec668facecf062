// ABOUTME: Public library API for the monex monitor exporter
// ABOUTME: Re-exports core modules for external use

pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod pipeline;

pub use api::Record;
pub use error::{Error, Result};

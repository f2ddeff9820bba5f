//! Typed client and session gating for the desktop-memory backend.

mod client;
pub mod config;
pub mod credentials;
mod error;
pub mod models;
pub mod redirect;
pub mod routing;
mod session;
pub mod timezone;

pub use client::*;
pub use config::ApiConfig;
pub use credentials::{CredentialStore, FileCredentialStore, MemoryCredentialStore};
pub use error::ApiError;
pub use redirect::{LoginRedirect, Redirect};
pub use reqwest::StatusCode;
pub use routing::{Resolution, Route};
pub use session::*;

//! Authenticated client for the Assets server REST API.
//!
//! [`AssetsClient`] caches a bearer token with a validity window and wraps
//! every call in the authenticate-then-retry cycle: authenticate when the
//! token is absent or expired, and on a 401 re-authenticate once and retry
//! once. A second 401 surfaces as an error.
//!
//! ```no_run
//! use ardea_client::AssetsClient;
//! use ardea_core::prelude::*;
//!
//! # async fn example() -> ardea_client::Result<()> {
//! let client = AssetsClient::new(AssetsConfig::new(
//!     "https://assets.example.com",
//!     "api",
//!     "secret",
//! ))?;
//! let results = client.search(&SearchRequest::new("assetType:image")).await?;
//! println!("{} hits", results.total_hits);
//! # Ok(())
//! # }
//! ```

pub mod admin;
pub mod client;
pub mod error;
pub mod folders;
mod services;

pub use admin::AdminApi;
pub use client::AssetsClient;
pub use error::{AssetsClientError, Result};
pub use folders::FoldersApi;

//! # Caspio Pricing API Client
//!
//! A Rust client for the Caspio pricing proxy REST API: product search, cart
//! sessions, order dashboards, pricing calculations and art requests.
//!
//! ## Overview
//!
//! This crate provides:
//! - Immutable configuration via [`ApiConfig`] and [`ApiConfigBuilder`]
//! - A validated [`BaseUrl`], defaulting to the production endpoint
//! - [`ApiClient`], an async REST call layer with uniform error translation
//! - Façades over the client in [`resources`], one per area of the API
//!
//! ## Quick Start
//!
//! ```rust
//! use pricing_api::{ApiClient, ApiConfig, BaseUrl};
//!
//! let config = ApiConfig::builder()
//!     .base_url(BaseUrl::local())
//!     .build()
//!     .unwrap();
//!
//! let client = ApiClient::new(config).unwrap();
//! assert_eq!(client.base_url().as_ref(), "http://localhost:3002/api");
//! ```
//!
//! ## Making API Requests
//!
//! ```rust,ignore
//! use pricing_api::{ApiClient, ApiError, BaseUrl};
//! use pricing_api::clients::QueryParams;
//!
//! let client = ApiClient::with_base_url(BaseUrl::production())?;
//!
//! let mut query = QueryParams::new();
//! query.insert("q.orderBy", "Date DESC").insert("q.limit", 1);
//!
//! match client.get("/production-schedules", Some(query)).await {
//!     Ok(schedules) => println!("{schedules}"),
//!     Err(ApiError::Http(e)) => println!("HTTP {}: {}", e.status, e.message),
//!     Err(e) => println!("Request failed: {e}"),
//! }
//! ```
//!
//! ## Using the Façades
//!
//! ```rust,ignore
//! use pricing_api::resources::{ProductCatalog, SearchFilters};
//!
//! let catalog = ProductCatalog::new(client.clone());
//! let results = catalog
//!     .search("polo", &SearchFilters { limit: Some(5), ..Default::default() })
//!     .await?;
//! println!("Found {} products", results.products.len());
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: configuration is instance-based and passed explicitly
//! - **Immutable configuration**: headers are fixed when the client is built
//! - **Thread-safe**: the client is `Clone + Send + Sync` and clones share one
//!   connection pool
//! - **No retries**: a failed call is logged and returned to the caller once

pub mod clients;
pub mod config;
pub mod error;
pub mod resources;

pub use config::{ApiConfig, ApiConfigBuilder, BaseUrl, DEFAULT_BASE_URL, LOCAL_BASE_URL};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    ApiClient, ApiError, ApiRequest, ApiResponse, DecodeError, HttpError, HttpMethod,
    InvalidRequestError, QueryParams, QueryValue,
};

//! Façades over [`ApiClient`] for each area of the pricing API.
//!
//! Each façade holds a clone of the client (sharing its connection pool) and
//! exposes a narrow call surface with fixed endpoint paths. Filters that the
//! server accepts are spelled out as explicit parameter structs.
//!
//! - [`ProductCatalog`]: product search, details, inventory and sizes
//! - [`CartManager`]: cart sessions, items and sizes
//! - [`OrderDashboard`]: dashboard metrics and order records
//! - [`PricingCalculator`]: pricing tiers, base costs and order quotes
//! - [`ArtRequestManager`]: art request listing, creation and updates
//! - [`ProductionSchedules`]: production availability
//!
//! # Example
//!
//! ```rust,ignore
//! use pricing_api::{ApiClient, BaseUrl};
//! use pricing_api::resources::{PricingCalculator, OrderPriceRequest, DecorationMethod};
//!
//! let client = ApiClient::with_base_url(BaseUrl::local())?;
//! let pricing = PricingCalculator::new(client.clone());
//!
//! let quote = pricing
//!     .quote(&OrderPriceRequest::new("PC61", DecorationMethod::Dtg, 50))
//!     .await?;
//! println!("Total: ${:.2}", quote.total_cost);
//! ```

mod art_requests;
mod cart;
mod dashboard;
mod pricing;
mod production;
mod products;
mod query;

pub use art_requests::{
    ArtRequestFilters, ArtRequestManager, ArtRequestUpdate, NewArtRequest, DEFAULT_STATUS,
};
pub use cart::{generate_session_id, CartItem, CartManager, CartSession, NewCartItem};
pub use dashboard::{DashboardQuery, OrderDashboard};
pub use pricing::{
    DecorationMethod, EmbroideryCost, OrderPriceQuote, OrderPriceRequest, PricingCalculator,
    PricingTier,
};
pub use production::ProductionSchedules;
pub use products::{ProductCatalog, ProductSearchResults, ProductWithInventory, SearchFilters};
pub use query::OdbcQuery;

use serde::de::DeserializeOwned;

use crate::clients::ApiError;

/// Deserializes a JSON response into the type a façade expects.
pub(crate) fn decode<T: DeserializeOwned>(
    endpoint: &str,
    value: serde_json::Value,
) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|source| ApiError::UnexpectedShape {
        endpoint: endpoint.to_string(),
        source,
    })
}

/// Deserializes a list response. An empty body (normalized to `{}` by the
/// client) is read as an empty list.
pub(crate) fn decode_list<T: DeserializeOwned>(
    endpoint: &str,
    value: serde_json::Value,
) -> Result<Vec<T>, ApiError> {
    match value {
        serde_json::Value::Object(map) if map.is_empty() => Ok(Vec::new()),
        other => decode(endpoint, other),
    }
}

/// Encodes a request body built by a façade.
pub(crate) fn encode<T: serde::Serialize>(
    endpoint: &str,
    body: &T,
) -> Result<serde_json::Value, ApiError> {
    serde_json::to_value(body).map_err(|source| ApiError::Serialize {
        endpoint: endpoint.to_string(),
        source,
    })
}

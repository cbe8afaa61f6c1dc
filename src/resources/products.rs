//! Product search, details and inventory.

use serde::{Deserialize, Serialize};

use crate::clients::{ApiClient, ApiError, QueryParams};
use crate::resources::decode;

const SEARCH_PATH: &str = "/products/search";
const DETAILS_PATH: &str = "/product-details";
const INVENTORY_PATH: &str = "/inventory";
const SIZES_PATH: &str = "/sizes-by-style-color";

/// Filters accepted by the product search endpoint.
///
/// Every field is optional; unset fields are left out of the query.
/// `categories` and `brands` match any of the listed values.
///
/// # Example
///
/// ```rust
/// use pricing_api::resources::SearchFilters;
///
/// let filters = SearchFilters {
///     categories: vec!["T-Shirts".to_string(), "Polos".to_string()],
///     sort: Some("price_asc".to_string()),
///     limit: Some(10),
///     ..Default::default()
/// };
///
/// assert_eq!(
///     filters.to_params("").to_query_string(),
///     "q=&category=T-Shirts&category=Polos&sort=price_asc&limit=10"
/// );
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchFilters {
    /// Restrict results to these categories (`category`).
    pub categories: Vec<String>,
    /// Restrict results to these brands (`brand`).
    pub brands: Vec<String>,
    /// Lower price bound (`minPrice`).
    pub min_price: Option<f64>,
    /// Upper price bound (`maxPrice`).
    pub max_price: Option<f64>,
    /// Ask the server for facet counts (`includeFacets`).
    pub include_facets: Option<bool>,
    /// Sort order such as `price_asc` (`sort`).
    pub sort: Option<String>,
    /// Maximum number of products (`limit`).
    pub limit: Option<u32>,
}

impl SearchFilters {
    /// Builds the query parameters for a search term and these filters.
    #[must_use]
    pub fn to_params(&self, query: &str) -> QueryParams {
        let mut params = QueryParams::new();
        params.insert("q", query);
        if !self.categories.is_empty() {
            params.insert("category", self.categories.as_slice());
        }
        if !self.brands.is_empty() {
            params.insert("brand", self.brands.as_slice());
        }
        params
            .insert_opt("minPrice", self.min_price)
            .insert_opt("maxPrice", self.max_price)
            .insert_opt("includeFacets", self.include_facets)
            .insert_opt("sort", self.sort.as_ref())
            .insert_opt("limit", self.limit);
        params
    }
}

/// Result of a product search.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ProductSearchResults {
    /// Matching products.
    #[serde(default)]
    pub products: Vec<serde_json::Value>,
    /// Facet counts keyed by facet type, when requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facets: Option<serde_json::Map<String, serde_json::Value>>,
}

/// Product details combined with inventory levels and available sizes.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ProductWithInventory {
    /// Response of `/product-details`.
    pub product: serde_json::Value,
    /// Response of `/inventory`.
    pub inventory: serde_json::Value,
    /// Response of `/sizes-by-style-color`.
    pub available_sizes: serde_json::Value,
}

/// Product catalog lookups.
#[derive(Clone, Debug)]
pub struct ProductCatalog {
    client: ApiClient,
}

impl ProductCatalog {
    /// Creates a catalog façade over the given client.
    #[must_use]
    pub const fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Searches for products matching a term and filters.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the call fails or the response has no
    /// product list shape.
    pub async fn search(
        &self,
        query: &str,
        filters: &SearchFilters,
    ) -> Result<ProductSearchResults, ApiError> {
        let body = self
            .client
            .get(SEARCH_PATH, Some(filters.to_params(query)))
            .await?;
        decode(SEARCH_PATH, body)
    }

    /// Fetches product details for a style and color.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the call fails.
    pub async fn details(&self, style_number: &str, color: &str) -> Result<serde_json::Value, ApiError> {
        self.client
            .get(DETAILS_PATH, Some(style_color(style_number, color)))
            .await
    }

    /// Fetches inventory levels for a style and color.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the call fails.
    pub async fn inventory(
        &self,
        style_number: &str,
        color: &str,
    ) -> Result<serde_json::Value, ApiError> {
        self.client
            .get(INVENTORY_PATH, Some(style_color(style_number, color)))
            .await
    }

    /// Fetches the sizes available for a style and color.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the call fails.
    pub async fn sizes(&self, style_number: &str, color: &str) -> Result<serde_json::Value, ApiError> {
        self.client
            .get(SIZES_PATH, Some(style_color(style_number, color)))
            .await
    }

    /// Fetches details, inventory and sizes for a style and color, in that
    /// order. The first failure stops the sequence.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if any of the three calls fails.
    pub async fn with_inventory(
        &self,
        style_number: &str,
        color: &str,
    ) -> Result<ProductWithInventory, ApiError> {
        let product = self.details(style_number, color).await?;
        let inventory = self.inventory(style_number, color).await?;
        let available_sizes = self.sizes(style_number, color).await?;

        Ok(ProductWithInventory {
            product,
            inventory,
            available_sizes,
        })
    }
}

fn style_color(style_number: &str, color: &str) -> QueryParams {
    [("styleNumber", style_number), ("color", color)]
        .into_iter()
        .collect()
}

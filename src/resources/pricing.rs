//! Pricing tiers, base costs and order price quotes.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::clients::{ApiClient, ApiError, QueryParams};
use crate::resources::{decode, decode_list};

const TIERS_PATH: &str = "/pricing-tiers";
const BASE_COSTS_PATH: &str = "/base-item-costs";
const EMBROIDERY_PATH: &str = "/embroidery-costs";

/// Item type used when pricing embroidery for a quote.
const EMBROIDERY_ITEM_TYPE: &str = "Shirt";

/// Decoration methods with server-side pricing tiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DecorationMethod {
    /// Direct-to-garment printing.
    Dtg,
    /// Screen printing.
    ScreenPrint,
    /// Embroidery, priced by stitch count.
    Embroidery,
}

impl DecorationMethod {
    /// Returns the method name the API expects.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dtg => "DTG",
            Self::ScreenPrint => "ScreenPrint",
            Self::Embroidery => "Embroidery",
        }
    }
}

impl fmt::Display for DecorationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A quantity band and its per-item decoration price.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PricingTier {
    /// Smallest quantity in the band, inclusive.
    pub min_quantity: u32,
    /// Largest quantity in the band, inclusive.
    pub max_quantity: u32,
    /// Per-item price within the band.
    pub price: f64,
    /// Any other fields the server returned.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl PricingTier {
    /// Returns `true` if the quantity falls inside this band.
    #[must_use]
    pub const fn contains(&self, quantity: u32) -> bool {
        self.min_quantity <= quantity && quantity <= self.max_quantity
    }
}

/// Embroidery cost for an item type and stitch count.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct EmbroideryCost {
    /// Per-item embroidery cost.
    pub cost: f64,
    /// Any other fields the server returned.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Inputs for an order price quote.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrderPriceRequest {
    /// Style number, e.g. `PC61`.
    pub style_number: String,
    /// Decoration method.
    pub decoration: DecorationMethod,
    /// Number of items.
    pub quantity: u32,
    /// Stitch count, used for embroidery.
    pub stitch_count: Option<u32>,
}

impl OrderPriceRequest {
    /// Creates a request without a stitch count.
    #[must_use]
    pub fn new(style_number: impl Into<String>, decoration: DecorationMethod, quantity: u32) -> Self {
        Self {
            style_number: style_number.into(),
            decoration,
            quantity,
            stitch_count: None,
        }
    }

    /// Sets the stitch count.
    #[must_use]
    pub const fn stitch_count(mut self, stitches: u32) -> Self {
        self.stitch_count = Some(stitches);
        self
    }
}

/// A computed order price.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderPriceQuote {
    /// Mean base cost across sizes.
    pub base_cost_per_item: f64,
    /// Decoration cost per item.
    pub decoration_cost_per_item: f64,
    /// Number of items.
    pub quantity: u32,
    /// `(base + decoration) * quantity`.
    pub total_cost: f64,
}

impl OrderPriceQuote {
    fn compute(base_costs: &BTreeMap<String, f64>, decoration_cost: f64, quantity: u32) -> Self {
        let base_cost_per_item = if base_costs.is_empty() {
            0.0
        } else {
            #[allow(clippy::cast_precision_loss)]
            let count = base_costs.len() as f64;
            base_costs.values().sum::<f64>() / count
        };

        Self {
            base_cost_per_item,
            decoration_cost_per_item: decoration_cost,
            quantity,
            total_cost: (base_cost_per_item + decoration_cost) * f64::from(quantity),
        }
    }
}

/// Pricing lookups and order quotes.
#[derive(Clone, Debug)]
pub struct PricingCalculator {
    client: ApiClient,
}

impl PricingCalculator {
    /// Creates a pricing façade over the given client.
    #[must_use]
    pub const fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Fetches the pricing tiers for a decoration method.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the call fails or a tier is malformed.
    pub async fn pricing_tiers(&self, method: DecorationMethod) -> Result<Vec<PricingTier>, ApiError> {
        let mut query = QueryParams::new();
        query.insert("method", method.as_str());

        let response = self.client.get(TIERS_PATH, Some(query)).await?;
        decode_list(TIERS_PATH, response)
    }

    /// Fetches base costs by size for a style.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the call fails or a cost is not numeric.
    pub async fn base_item_costs(&self, style_number: &str) -> Result<BTreeMap<String, f64>, ApiError> {
        let mut query = QueryParams::new();
        query.insert("styleNumber", style_number);

        let response = self.client.get(BASE_COSTS_PATH, Some(query)).await?;
        decode(BASE_COSTS_PATH, response)
    }

    /// Fetches the embroidery cost for an item type and stitch count.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the call fails or the response has no cost.
    pub async fn embroidery_cost(
        &self,
        item_type: &str,
        stitch_count: u32,
    ) -> Result<EmbroideryCost, ApiError> {
        let mut query = QueryParams::new();
        query
            .insert("itemType", item_type)
            .insert("stitchCount", stitch_count);

        let response = self.client.get(EMBROIDERY_PATH, Some(query)).await?;
        decode(EMBROIDERY_PATH, response)
    }

    /// Quotes a total price for an order.
    ///
    /// The decoration cost comes from the first tier containing the
    /// quantity, or zero when none does. For embroidery with a non-zero
    /// stitch count, the embroidery cost replaces the tier price.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if any lookup fails.
    pub async fn quote(&self, request: &OrderPriceRequest) -> Result<OrderPriceQuote, ApiError> {
        let base_costs = self.base_item_costs(&request.style_number).await?;
        let tiers = self.pricing_tiers(request.decoration).await?;

        let tier = tiers.iter().find(|tier| tier.contains(request.quantity));
        tracing::debug!(
            "Pricing tier for {} x{}: {:?}",
            request.decoration,
            request.quantity,
            tier
        );
        let mut decoration_cost = tier.map_or(0.0, |tier| tier.price);

        if request.decoration == DecorationMethod::Embroidery {
            if let Some(stitches) = request.stitch_count.filter(|&s| s > 0) {
                decoration_cost = self
                    .embroidery_cost(EMBROIDERY_ITEM_TYPE, stitches)
                    .await?
                    .cost;
            }
        }

        Ok(OrderPriceQuote::compute(
            &base_costs,
            decoration_cost,
            request.quantity,
        ))
    }
}

//! Cart sessions and cart items.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::clients::{ApiClient, ApiError, QueryParams};
use crate::resources::{decode, decode_list, encode};

const SESSIONS_PATH: &str = "/cart-sessions";
const ITEMS_PATH: &str = "/cart-items";
const ITEM_SIZES_PATH: &str = "/cart-item-sizes";

/// Generates a client-side cart session identifier of the form
/// `session_{unix_seconds}_{random}`.
#[must_use]
pub fn generate_session_id() -> String {
    format!(
        "session_{}_{}",
        Utc::now().timestamp(),
        rand::random::<u32>()
    )
}

/// A cart session as returned by the server.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CartSession {
    /// The session identifier.
    #[serde(rename = "SessionID")]
    pub session_id: String,
    /// Any other fields the server returned.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A cart item as returned by the server.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CartItem {
    /// The cart item's primary key.
    #[serde(rename = "PK_ID")]
    pub id: i64,
    /// Any other fields the server returned.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A product to add to the cart.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewCartItem {
    /// Product identifier.
    pub product_id: String,
    /// Style number, e.g. `PC61`.
    pub style_number: String,
    /// Garment color.
    pub color: String,
    /// Product title.
    pub title: String,
}

#[derive(Serialize)]
struct SessionBody<'a> {
    #[serde(rename = "SessionID")]
    session_id: &'a str,
    #[serde(rename = "UserID")]
    user_id: Option<i64>,
    #[serde(rename = "IsActive")]
    is_active: bool,
}

#[derive(Serialize)]
struct ItemBody<'a> {
    #[serde(rename = "SessionID")]
    session_id: &'a str,
    #[serde(rename = "ProductID")]
    product_id: &'a str,
    #[serde(rename = "StyleNumber")]
    style_number: &'a str,
    #[serde(rename = "Color")]
    color: &'a str,
    #[serde(rename = "PRODUCT_TITLE")]
    title: &'a str,
    #[serde(rename = "CartStatus")]
    cart_status: &'a str,
}

#[derive(Serialize)]
struct ItemSizeBody<'a> {
    #[serde(rename = "CartItemID")]
    cart_item_id: i64,
    #[serde(rename = "Size")]
    size: &'a str,
    #[serde(rename = "Quantity")]
    quantity: u32,
    #[serde(rename = "UnitPrice", skip_serializing_if = "Option::is_none")]
    unit_price: Option<f64>,
}

/// Manages one cart session and its items.
///
/// The manager remembers the session it created; items are added to that
/// session, and one is created on demand if none exists yet.
///
/// # Example
///
/// ```rust,ignore
/// use pricing_api::resources::{CartManager, NewCartItem};
///
/// let mut cart = CartManager::new(client.clone());
/// let item = cart
///     .add_item(&NewCartItem {
///         product_id: "123".to_string(),
///         style_number: "PC61".to_string(),
///         color: "Navy".to_string(),
///         title: "Essential Tee".to_string(),
///     })
///     .await?;
/// cart.add_item_size(item.id, "M", 5, Some(12.99)).await?;
/// ```
#[derive(Clone, Debug)]
pub struct CartManager {
    client: ApiClient,
    session_id: Option<String>,
}

impl CartManager {
    /// Creates a cart manager with no active session.
    #[must_use]
    pub const fn new(client: ApiClient) -> Self {
        Self {
            client,
            session_id: None,
        }
    }

    /// Returns the active session identifier, if any.
    #[must_use]
    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    /// Creates a new cart session and makes it the active one.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the call fails or the response carries no
    /// `SessionID`.
    pub async fn create_session(&mut self, user_id: Option<i64>) -> Result<CartSession, ApiError> {
        let session_id = generate_session_id();
        let body = encode(
            SESSIONS_PATH,
            &SessionBody {
                session_id: &session_id,
                user_id,
                is_active: true,
            },
        )?;

        let response = self.client.post(SESSIONS_PATH, Some(body)).await?;
        let session: CartSession = decode(SESSIONS_PATH, response)?;
        tracing::debug!("Created cart session {}", session.session_id);

        self.session_id = Some(session.session_id.clone());
        Ok(session)
    }

    /// Adds a product to the active cart, creating a session first if
    /// needed.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if session creation or the call fails.
    pub async fn add_item(&mut self, item: &NewCartItem) -> Result<CartItem, ApiError> {
        let session_id = match &self.session_id {
            Some(id) => id.clone(),
            None => self.create_session(None).await?.session_id,
        };

        let body = encode(
            ITEMS_PATH,
            &ItemBody {
                session_id: &session_id,
                product_id: &item.product_id,
                style_number: &item.style_number,
                color: &item.color,
                title: &item.title,
                cart_status: "Active",
            },
        )?;

        let response = self.client.post(ITEMS_PATH, Some(body)).await?;
        decode(ITEMS_PATH, response)
    }

    /// Records a size and quantity for a cart item.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the call fails.
    pub async fn add_item_size(
        &self,
        cart_item_id: i64,
        size: &str,
        quantity: u32,
        unit_price: Option<f64>,
    ) -> Result<serde_json::Value, ApiError> {
        let body = encode(
            ITEM_SIZES_PATH,
            &ItemSizeBody {
                cart_item_id,
                size,
                quantity,
                unit_price,
            },
        )?;

        self.client.post(ITEM_SIZES_PATH, Some(body)).await
    }

    /// Lists the items in the active session.
    ///
    /// Returns an empty list without calling the API when no session
    /// exists.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the call fails or the response is not a list.
    pub async fn cart_items(&self) -> Result<Vec<serde_json::Value>, ApiError> {
        let Some(session_id) = &self.session_id else {
            return Ok(Vec::new());
        };

        let mut query = QueryParams::new();
        query.insert("sessionID", session_id);

        let response = self.client.get(ITEMS_PATH, Some(query)).await?;
        decode_list(ITEMS_PATH, response)
    }
}

//! Art request management.
//!
//! # Example
//!
//! ```rust,ignore
//! use pricing_api::resources::{ArtRequestManager, ArtRequestUpdate, NewArtRequest};
//!
//! let art = ArtRequestManager::new(client.clone());
//!
//! let created = art
//!     .create(&NewArtRequest {
//!         priority: Some("High".to_string()),
//!         garment_style: Some("PC61".to_string()),
//!         ..NewArtRequest::new("Test Company")
//!     })
//!     .await?;
//!
//! if let Some(id) = created["PK_ID"].as_i64() {
//!     art.update(id, &ArtRequestUpdate::completed(chrono::Utc::now())).await?;
//! }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::{ApiClient, ApiError, QueryParams};
use crate::resources::{decode_list, encode};

const ART_REQUESTS_PATH: &str = "/artrequests";

/// Status given to new art requests unless another is set.
pub const DEFAULT_STATUS: &str = "In Progress";

/// Filters for listing art requests.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ArtRequestFilters {
    /// Only requests with this status (`status`).
    pub status: Option<String>,
    /// Maximum number of requests (`limit`).
    pub limit: Option<u32>,
}

impl ArtRequestFilters {
    /// Converts the filters into request parameters.
    #[must_use]
    pub fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params
            .insert_opt("status", self.status.as_ref())
            .insert_opt("limit", self.limit);
        params
    }
}

/// A new art request.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewArtRequest {
    /// Customer company name.
    #[serde(rename = "CompanyName")]
    pub company_name: String,
    /// Workflow status.
    #[serde(rename = "Status")]
    pub status: String,
    /// Assigned customer service representative.
    #[serde(rename = "CustomerServiceRep", skip_serializing_if = "Option::is_none")]
    pub customer_service_rep: Option<String>,
    /// Priority label, e.g. `High`.
    #[serde(rename = "Priority", skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    /// Whether a mockup is requested.
    #[serde(rename = "Mockup", skip_serializing_if = "Option::is_none")]
    pub mockup: Option<bool>,
    /// Garment style number.
    #[serde(rename = "GarmentStyle", skip_serializing_if = "Option::is_none")]
    pub garment_style: Option<String>,
    /// Garment color.
    #[serde(rename = "GarmentColor", skip_serializing_if = "Option::is_none")]
    pub garment_color: Option<String>,
    /// Free-form notes.
    #[serde(rename = "NOTES", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl NewArtRequest {
    /// Creates a request for a company with the default status.
    #[must_use]
    pub fn new(company_name: impl Into<String>) -> Self {
        Self {
            company_name: company_name.into(),
            status: DEFAULT_STATUS.to_string(),
            customer_service_rep: None,
            priority: None,
            mockup: None,
            garment_style: None,
            garment_color: None,
            notes: None,
        }
    }
}

/// Changes to an existing art request. Unset fields are left untouched.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArtRequestUpdate {
    /// New workflow status.
    #[serde(rename = "Status", skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Whether the request has been invoiced.
    #[serde(rename = "Invoiced", skip_serializing_if = "Option::is_none")]
    pub invoiced: Option<bool>,
    /// When the request was invoiced.
    #[serde(rename = "Invoiced_Date", skip_serializing_if = "Option::is_none")]
    pub invoiced_date: Option<DateTime<Utc>>,
    /// New priority label.
    #[serde(rename = "Priority", skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    /// Replacement notes.
    #[serde(rename = "NOTES", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ArtRequestUpdate {
    /// An update marking a request completed and invoiced at the given time.
    #[must_use]
    pub fn completed(invoiced_at: DateTime<Utc>) -> Self {
        Self {
            status: Some("Completed".to_string()),
            invoiced: Some(true),
            invoiced_date: Some(invoiced_at),
            ..Self::default()
        }
    }
}

/// Art request listing, creation and updates.
#[derive(Clone, Debug)]
pub struct ArtRequestManager {
    client: ApiClient,
}

impl ArtRequestManager {
    /// Creates an art request façade over the given client.
    #[must_use]
    pub const fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Lists art requests matching the filters.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the call fails or the response is not a list.
    pub async fn list(&self, filters: &ArtRequestFilters) -> Result<Vec<serde_json::Value>, ApiError> {
        let response = self
            .client
            .get(ART_REQUESTS_PATH, Some(filters.to_params()))
            .await?;
        decode_list(ART_REQUESTS_PATH, response)
    }

    /// Creates an art request and returns the stored record.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the call fails.
    pub async fn create(&self, request: &NewArtRequest) -> Result<serde_json::Value, ApiError> {
        let body = encode(ART_REQUESTS_PATH, request)?;
        self.client.post(ART_REQUESTS_PATH, Some(body)).await
    }

    /// Applies changes to an existing art request.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the call fails.
    pub async fn update(
        &self,
        id: i64,
        update: &ArtRequestUpdate,
    ) -> Result<serde_json::Value, ApiError> {
        let path = format!("{ART_REQUESTS_PATH}/{id}");
        let body = encode(&path, update)?;
        self.client.put(&path, Some(body)).await
    }
}

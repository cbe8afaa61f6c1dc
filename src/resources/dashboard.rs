//! Order dashboard metrics and order records.

use crate::clients::{ApiClient, ApiError, QueryParams};
use crate::resources::{decode_list, OdbcQuery};

const DASHBOARD_PATH: &str = "/order-dashboard";
const ORDERS_PATH: &str = "/order-odbc";

/// Parameters for dashboard metrics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DashboardQuery {
    /// Number of days to summarize.
    pub days: u32,
    /// Include recent order details.
    pub include_details: bool,
    /// Include a year-over-year comparison.
    pub compare_yoy: bool,
}

impl Default for DashboardQuery {
    fn default() -> Self {
        Self {
            days: 7,
            include_details: false,
            compare_yoy: false,
        }
    }
}

impl DashboardQuery {
    /// Creates a query for the given number of days.
    #[must_use]
    pub fn days(days: u32) -> Self {
        Self {
            days,
            ..Self::default()
        }
    }

    /// Converts the query into request parameters.
    #[must_use]
    pub fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params
            .insert("days", self.days)
            .insert("includeDetails", self.include_details)
            .insert("compareYoY", self.compare_yoy);
        params
    }
}

/// Order dashboard queries.
#[derive(Clone, Debug)]
pub struct OrderDashboard {
    client: ApiClient,
}

impl OrderDashboard {
    /// Creates a dashboard façade over the given client.
    #[must_use]
    pub const fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Fetches summary metrics for a period.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the call fails.
    pub async fn metrics(&self, query: &DashboardQuery) -> Result<serde_json::Value, ApiError> {
        self.client
            .get(DASHBOARD_PATH, Some(query.to_params()))
            .await
    }

    /// Fetches order records matching a query.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the call fails or the response is not a list.
    pub async fn order_records(&self, query: &OdbcQuery) -> Result<Vec<serde_json::Value>, ApiError> {
        let response = self.client.get(ORDERS_PATH, Some(query.to_params())).await?;
        decode_list(ORDERS_PATH, response)
    }
}

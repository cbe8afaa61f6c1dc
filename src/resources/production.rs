//! Production schedule availability.

use crate::clients::{ApiClient, ApiError};
use crate::resources::{decode_list, OdbcQuery};

const SCHEDULES_PATH: &str = "/production-schedules";

/// Production schedule lookups.
#[derive(Clone, Debug)]
pub struct ProductionSchedules {
    client: ApiClient,
}

impl ProductionSchedules {
    /// Creates a production schedule façade over the given client.
    #[must_use]
    pub const fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Lists schedule records matching a query.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the call fails or the response is not a list.
    pub async fn list(&self, query: &OdbcQuery) -> Result<Vec<serde_json::Value>, ApiError> {
        let response = self
            .client
            .get(SCHEDULES_PATH, Some(query.to_params()))
            .await?;
        decode_list(SCHEDULES_PATH, response)
    }

    /// Returns the most recent schedule record, if any.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the call fails or the response is not a list.
    pub async fn latest(&self) -> Result<Option<serde_json::Value>, ApiError> {
        let query = OdbcQuery::new().order_by("Date DESC").limit(1);
        Ok(self.list(&query).await?.into_iter().next())
    }
}

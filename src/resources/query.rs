//! Record query parameters shared by the table-backed endpoints.

use crate::clients::QueryParams;

/// Filtering, ordering and limiting for record endpoints such as
/// `/order-odbc` and `/production-schedules`.
///
/// Fields map to the server's `q.where`, `q.orderBy` and `q.limit`
/// parameters. Unset fields are omitted from the query.
///
/// # Example
///
/// ```rust
/// use pricing_api::resources::OdbcQuery;
///
/// let query = OdbcQuery::new()
///     .filter("sts_Invoiced=1 AND sts_Shipped=0")
///     .order_by("date_OrderPlaced DESC")
///     .limit(50);
///
/// assert_eq!(query.to_params().len(), 3);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OdbcQuery {
    /// SQL-style filter expression (`q.where`).
    pub filter: Option<String>,
    /// Sort expression (`q.orderBy`).
    pub order_by: Option<String>,
    /// Maximum number of records (`q.limit`).
    pub limit: Option<u32>,
}

impl OdbcQuery {
    /// Creates an empty query.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the `q.where` filter expression.
    #[must_use]
    pub fn filter(mut self, expression: impl Into<String>) -> Self {
        self.filter = Some(expression.into());
        self
    }

    /// Sets the `q.orderBy` sort expression.
    #[must_use]
    pub fn order_by(mut self, expression: impl Into<String>) -> Self {
        self.order_by = Some(expression.into());
        self
    }

    /// Sets the `q.limit` record limit.
    #[must_use]
    pub const fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Converts the query into request parameters.
    #[must_use]
    pub fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params
            .insert_opt("q.where", self.filter.as_ref())
            .insert_opt("q.orderBy", self.order_by.as_ref())
            .insert_opt("q.limit", self.limit);
        params
    }
}

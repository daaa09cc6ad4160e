//! Report endpoints.
//!
//! Aggregation happens server-side; the portal passes the date range
//! through verbatim and renders what comes back.

use tracing::instrument;

use super::types::{BookingsReport, RevenueReport};
use super::{ApiClient, ApiError, Credential};

/// Build the `from`/`to` query pair, omitting unset bounds.
fn range_query(from: Option<&str>, to: Option<&str>) -> Vec<(&'static str, String)> {
    let mut query = Vec::new();
    if let Some(from) = from {
        query.push(("from", from.to_string()));
    }
    if let Some(to) = to {
        query.push(("to", to.to_string()));
    }
    query
}

impl ApiClient {
    /// Fetch the revenue report via `GET /reports/revenue?from&to`.
    ///
    /// Dates are ISO `YYYY-MM-DD` strings straight from the form; the
    /// server validates them.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on any non-2xx response or transport failure.
    #[instrument(skip(self, auth))]
    pub async fn revenue_report(
        &self,
        auth: &Credential,
        from: Option<&str>,
        to: Option<&str>,
    ) -> Result<RevenueReport, ApiError> {
        self.get("/reports/revenue", Some(auth), &range_query(from, to))
            .await
    }

    /// Fetch the bookings report via `GET /reports/bookings?from&to`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on any non-2xx response or transport failure.
    #[instrument(skip(self, auth))]
    pub async fn bookings_report(
        &self,
        auth: &Credential,
        from: Option<&str>,
        to: Option<&str>,
    ) -> Result<BookingsReport, ApiError> {
        self.get("/reports/bookings", Some(auth), &range_query(from, to))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_query_omits_unset_bounds() {
        assert!(range_query(None, None).is_empty());
        assert_eq!(
            range_query(Some("2026-08-01"), None),
            vec![("from", "2026-08-01".to_string())]
        );
        assert_eq!(range_query(None, Some("2026-08-31")).len(), 1);
        assert_eq!(range_query(Some("2026-08-01"), Some("2026-08-31")).len(), 2);
    }
}

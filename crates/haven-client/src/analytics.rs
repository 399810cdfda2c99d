use haven_core::analytics::{AnalyticsData, TimeFrame};
use tracing::{debug, warn};

use crate::{error::FetchError, http::DataSource};

pub const SELLER_ANALYTICS_PATH: &str = "/api/seller/analytics";

/// Fetches the signed-in seller's analytics.
///
/// The seller is whoever the forwarded session belongs to; this client never
/// names one itself.
#[derive(Debug, Clone)]
pub struct AnalyticsClient {
    source: DataSource,
}

impl AnalyticsClient {
    pub fn new(source: DataSource) -> Self {
        Self { source }
    }

    pub fn with_session(&self, cookie: Option<String>) -> Self {
        Self {
            source: self.source.with_session(cookie),
        }
    }

    /// Single attempt against `GET /api/seller/analytics`, returning the
    /// payload exactly as the data source aggregated and ordered it.
    pub async fn try_seller_analytics(
        &self,
        timeframe: TimeFrame,
    ) -> Result<AnalyticsData, FetchError> {
        let data: AnalyticsData = self
            .source
            .get_json(SELLER_ANALYTICS_PATH, &[("timeframe", timeframe.as_str())])
            .await?;
        if !data.summary.is_consistent() {
            debug!(
                timeframe = %timeframe,
                total_revenue = data.summary.total_revenue,
                total_orders = data.summary.total_orders,
                average_order_value = data.summary.average_order_value,
                "Data source summary has an inconsistent average order value"
            );
        }
        Ok(data)
    }

    /// Never fails: any transport or parse error is logged once and replaced
    /// with the zero-value [`AnalyticsData`].
    pub async fn seller_analytics(&self, timeframe: TimeFrame) -> AnalyticsData {
        match self.try_seller_analytics(timeframe).await {
            Ok(data) => data,
            Err(e) => {
                warn!(
                    error = %e,
                    kind = e.kind(),
                    timeframe = %timeframe,
                    "Seller analytics fetch failed; serving empty analytics"
                );
                AnalyticsData::default()
            }
        }
    }

    /// [`Self::seller_analytics`] over the default window (`month`).
    pub async fn seller_analytics_default(&self) -> AnalyticsData {
        self.seller_analytics(TimeFrame::default()).await
    }
}

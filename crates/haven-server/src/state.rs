use std::sync::Arc;

use anyhow::Result;
use haven_chart::SalesBarChart;
use haven_client::{AnalyticsClient, DataSource, JsonCatalog, ProductImageQuery};
use haven_core::config::Config;
use tracing::info;

/// Shared application state injected into every Axum handler via
/// [`axum::extract::State`].
///
/// Holds no per-request data. Handlers derive session-scoped clients from the
/// templates stored here.
pub struct AppState {
    /// Parsed configuration, loaded once at startup from environment variables.
    pub config: Arc<Config>,

    pub analytics: AnalyticsClient,

    /// Product image lookups, wired to the feature table in `config`.
    pub images: ProductImageQuery,

    pub chart: SalesBarChart,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let source = DataSource::new(&config.data_source_url)?;

        let mut images = ProductImageQuery::new(source.clone(), config.features);
        if let Some(path) = &config.catalog_path {
            info!(catalog = %path.display(), "JSON product catalog configured");
            images = images.with_catalog(JsonCatalog::new(path));
        }

        Ok(Self {
            analytics: AnalyticsClient::new(source),
            images,
            chart: SalesBarChart::default(),
            config: Arc::new(config),
        })
    }
}

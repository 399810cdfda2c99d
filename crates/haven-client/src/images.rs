use std::path::PathBuf;

use haven_core::{features::FeatureFlags, image::ProductImage};
use tracing::{debug, warn};

use crate::{error::FetchError, http::DataSource};

pub const PRODUCT_IMAGES_PATH: &str = "/api/product-images";

/// Local JSON catalog of product images: an array of [`ProductImage`].
///
/// Stands in for the database-backed endpoint, so it applies the same
/// contract: exact category match, ordered by name ascending.
#[derive(Debug, Clone)]
pub struct JsonCatalog {
    path: PathBuf,
}

impl JsonCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub async fn load(&self, category: Option<&str>) -> Result<Vec<ProductImage>, FetchError> {
        let raw = tokio::fs::read(&self.path).await?;
        let mut images: Vec<ProductImage> = serde_json::from_slice(&raw)?;
        if let Some(category) = category {
            images.retain(|image| image.in_category(category));
        }
        images.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(images)
    }
}

#[derive(Debug, Clone)]
pub struct ProductImageQuery {
    source: DataSource,
    catalog: Option<JsonCatalog>,
    features: FeatureFlags,
}

impl ProductImageQuery {
    pub fn new(source: DataSource, features: FeatureFlags) -> Self {
        Self {
            source,
            catalog: None,
            features,
        }
    }

    pub fn with_catalog(mut self, catalog: JsonCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn with_session(&self, cookie: Option<String>) -> Self {
        Self {
            source: self.source.with_session(cookie),
            ..self.clone()
        }
    }

    /// Single attempt against `GET /api/product-images`. Filtering and
    /// ordering are done by the data source.
    pub async fn try_product_images(
        &self,
        category: Option<&str>,
    ) -> Result<Vec<ProductImage>, FetchError> {
        let query: Vec<(&str, &str)> = category.map(|c| ("category", c)).into_iter().collect();
        self.source.get_json(PRODUCT_IMAGES_PATH, &query).await
    }

    /// Never fails. Consults the endpoint when `USE_DATABASE` is on, then the
    /// JSON catalog when `FALLBACK_TO_JSON` is on, and returns an empty list
    /// once every enabled source has failed.
    pub async fn product_images(&self, category: Option<&str>) -> Vec<ProductImage> {
        if self.features.use_database {
            match self.try_product_images(category).await {
                Ok(images) => return images,
                Err(e) => warn!(
                    error = %e,
                    kind = e.kind(),
                    category = category.unwrap_or(""),
                    "Product image fetch failed"
                ),
            }
        }

        if !self.features.fallback_to_json {
            return Vec::new();
        }
        let Some(catalog) = &self.catalog else {
            debug!("JSON fallback enabled but no catalog configured");
            return Vec::new();
        };

        match catalog.load(category).await {
            Ok(images) => images,
            Err(e) => {
                warn!(
                    error = %e,
                    kind = e.kind(),
                    path = %catalog.path.display(),
                    "Product image catalog unavailable"
                );
                Vec::new()
            }
        }
    }
}

//! Client side of the seller dashboard: typed fetches against the data source
//! that degrade to empty values instead of failing.

pub mod analytics;
pub mod error;
pub mod http;
pub mod images;

pub use analytics::AnalyticsClient;
pub use error::FetchError;
pub use http::DataSource;
pub use images::{JsonCatalog, ProductImageQuery};

use std::path::PathBuf;

use crate::features::FeatureFlags;

pub const DEFAULT_CHART_WIDTH: u32 = 800;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Base URL of the analytics / product image data source.
    pub data_source_url: String,
    /// Local JSON catalog consulted when `FALLBACK_TO_JSON` is on.
    pub catalog_path: Option<PathBuf>,
    pub chart_width: u32,
    pub features: FeatureFlags,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            port: std::env::var("HAVEN_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|e| format!("invalid port: {e}"))?,
            data_source_url: std::env::var("HAVEN_DATA_SOURCE_URL")
                .unwrap_or_else(|_| "http://localhost:8080".to_string()),
            catalog_path: std::env::var("HAVEN_CATALOG_PATH")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
            chart_width: std::env::var("HAVEN_CHART_WIDTH")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_CHART_WIDTH),
            features: FeatureFlags::from_env(),
        })
    }
}

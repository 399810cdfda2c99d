use std::str::FromStr;

/// Named switches in the feature table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    /// Serve product images from the database-backed endpoint.
    UseDatabase,
    /// Fall back to the local JSON catalog when the database source is off or failing.
    FallbackToJson,
}

impl Feature {
    pub fn env_key(&self) -> &'static str {
        match self {
            Feature::UseDatabase => "USE_DATABASE",
            Feature::FallbackToJson => "FALLBACK_TO_JSON",
        }
    }
}

impl FromStr for Feature {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "USE_DATABASE" => Ok(Feature::UseDatabase),
            "FALLBACK_TO_JSON" => Ok(Feature::FallbackToJson),
            _ => Err(()),
        }
    }
}

/// Process-wide feature table, read once at startup and handed to consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureFlags {
    pub use_database: bool,
    pub fallback_to_json: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            use_database: true,
            fallback_to_json: false,
        }
    }
}

impl FeatureFlags {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the table from an arbitrary key lookup. Keys that are absent keep
    /// their default; present keys are truthy only for `1`, `true` or `yes`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let flag = |feature: Feature, default: bool| {
            lookup(feature.env_key())
                .map(|raw| is_truthy(&raw))
                .unwrap_or(default)
        };
        Self {
            use_database: flag(Feature::UseDatabase, defaults.use_database),
            fallback_to_json: flag(Feature::FallbackToJson, defaults.fallback_to_json),
        }
    }

    pub fn is_enabled(&self, feature: Feature) -> bool {
        match feature {
            Feature::UseDatabase => self.use_database,
            Feature::FallbackToJson => self.fallback_to_json,
        }
    }

    /// Lookup by table key. Unknown names are never enabled.
    pub fn is_feature_enabled(&self, name: &str) -> bool {
        name.parse::<Feature>()
            .map(|feature| self.is_enabled(feature))
            .unwrap_or(false)
    }
}

fn is_truthy(raw: &str) -> bool {
    let trimmed = raw.trim();
    trimmed.eq_ignore_ascii_case("1")
        || trimmed.eq_ignore_ascii_case("true")
        || trimmed.eq_ignore_ascii_case("yes")
}

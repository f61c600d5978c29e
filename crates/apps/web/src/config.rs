use scene::FocusConfig;
use serde::Deserialize;

pub const DEFAULT_REGIONS_URL: &str = "/ne_110m_admin_0_countries.geojson";
pub const DEFAULT_FILTER_FIELD: &str = "Country";

#[derive(Debug)]
pub struct ConfigError(String);

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid globe config: {}", self.0)
    }
}

impl std::error::Error for ConfigError {}

/// Settings handed over by the host page when a view is mounted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GlobeConfig {
    /// Worksheet whose filter follows the focused region.
    pub worksheet_name: Option<String>,
    /// Field the region name is filtered on.
    pub filter_field: String,
    pub regions_url: String,
    /// Data column used to scale point radii, if any.
    pub size_field: Option<String>,
    pub focus: FocusConfig,
}

impl Default for GlobeConfig {
    fn default() -> Self {
        Self {
            worksheet_name: None,
            filter_field: DEFAULT_FILTER_FIELD.to_string(),
            regions_url: DEFAULT_REGIONS_URL.to_string(),
            size_field: None,
            focus: FocusConfig::default(),
        }
    }
}

impl GlobeConfig {
    /// Blank input means all defaults.
    pub fn from_json(payload: &str) -> Result<Self, ConfigError> {
        if payload.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(payload).map_err(|e| ConfigError(e.to_string()))
    }
}

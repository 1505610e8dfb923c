use serde::{Deserialize, Serialize};

/// Tunables for the commit timeline page.
///
/// Every field has a default, so the host may pass a partial JSON object
/// (or nothing at all) to the controller constructors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    pub chart: ChartConfig,
    pub scrolly: ScrollyConfig,
    /// Prefix joined with a commit id to build its link.
    pub commit_url_base: String,
    /// Slider position (0-100) applied right after loading.
    pub initial_progress: f64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            chart: ChartConfig::default(),
            scrolly: ScrollyConfig::default(),
            commit_url_base: "https://github.com/vis-society/lab-7/commit/".to_string(),
            initial_progress: 100.0,
        }
    }
}

impl Config {
    /// Parse a JSON config, falling back to defaults when it is absent or malformed.
    pub fn from_json(json: Option<&str>) -> Config {
        let Some(text) = json.map(str::trim).filter(|t| !t.is_empty()) else {
            return Config::default();
        };
        match serde_json::from_str(text) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Ignoring malformed config, using defaults: {}", e);
                Config::default()
            }
        }
    }
}

/// Scatterplot geometry in SVG viewBox units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChartConfig {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
    pub radius_min: f64,
    pub radius_max: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        ChartConfig {
            width: 1000.0,
            height: 600.0,
            margin: Margin::default(),
            radius_min: 2.0,
            radius_max: 30.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margin {
    fn default() -> Self {
        Margin {
            top: 10.0,
            right: 10.0,
            bottom: 30.0,
            left: 20.0,
        }
    }
}

/// Scrollytelling list geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScrollyConfig {
    pub item_height: f64,
    pub visible_count: usize,
}

impl Default for ScrollyConfig {
    fn default() -> Self {
        ScrollyConfig {
            item_height: 60.0,
            visible_count: 10,
        }
    }
}

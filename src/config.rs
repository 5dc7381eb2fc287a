//! Chart configuration.
//!
//! Defaults match the published page. A page may override any subset of the
//! fields with an inline JSON block:
//!
//! ```html
//! <script id="chart-config" type="application/json">{ "width": 1200 }</script>
//! ```

use serde::{Deserialize, Serialize};

use crate::model::DatasetKind;

pub const CONFIG_ELEMENT_ID: &str = "chart-config";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChartConfig {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
    pub round: bool,
    /// Distance in px between the cursor and the tooltip's top-left corner.
    pub tooltip_offset: f64,
    pub default_dataset: DatasetKind,
    pub legend: LegendConfig,
    pub sources: DatasetSources,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 900.0,
            height: 600.0,
            padding: 1.0,
            round: true,
            tooltip_offset: 10.0,
            default_dataset: DatasetKind::VideoGames,
            legend: LegendConfig::default(),
            sources: DatasetSources::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LegendConfig {
    pub width: f64,
    /// Height reserved per entry when sizing the legend svg.
    pub row_height: f64,
    /// Vertical distance between consecutive entries.
    pub row_spacing: f64,
    pub swatch_size: f64,
    pub text_x: f64,
    pub text_y: f64,
}

impl Default for LegendConfig {
    fn default() -> Self {
        Self {
            width: 250.0,
            row_height: 31.0,
            row_spacing: 25.0,
            swatch_size: 20.0,
            text_x: 30.0,
            text_y: 15.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetSources {
    pub kickstarter: String,
    pub movies: String,
    #[serde(rename = "video-games")]
    pub video_games: String,
}

impl Default for DatasetSources {
    fn default() -> Self {
        Self {
            kickstarter: DatasetKind::Kickstarter.default_url().to_string(),
            movies: DatasetKind::Movies.default_url().to_string(),
            video_games: DatasetKind::VideoGames.default_url().to_string(),
        }
    }
}

impl DatasetSources {
    pub fn url(&self, kind: DatasetKind) -> &str {
        match kind {
            DatasetKind::Kickstarter => &self.kickstarter,
            DatasetKind::Movies => &self.movies,
            DatasetKind::VideoGames => &self.video_games,
        }
    }
}

impl ChartConfig {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Reads the inline config block; falls back to defaults when it is
    /// absent or malformed.
    pub fn from_document() -> Self {
        let Some(text) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content())
        else {
            return Self::default();
        };
        match Self::from_json(&text) {
            Ok(cfg) => {
                log::debug!("chart config loaded from #{}", CONFIG_ELEMENT_ID);
                cfg
            }
            Err(e) => {
                log::warn!("ignoring malformed #{}: {}", CONFIG_ELEMENT_ID, e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_yields_defaults() {
        let cfg = ChartConfig::from_json("{}").unwrap();
        assert_eq!(cfg, ChartConfig::default());
        assert_eq!(cfg.width, 900.0);
        assert_eq!(cfg.height, 600.0);
        assert_eq!(cfg.default_dataset, DatasetKind::VideoGames);
    }

    #[test]
    fn partial_override_keeps_other_fields() {
        let cfg = ChartConfig::from_json(
            r#"{ "width": 1200, "defaultDataset": "movies", "legend": { "rowSpacing": 30 },
                 "sources": { "movies": "/data/movies.json" } }"#,
        )
        .unwrap();
        assert_eq!(cfg.width, 1200.0);
        assert_eq!(cfg.height, 600.0);
        assert_eq!(cfg.default_dataset, DatasetKind::Movies);
        assert_eq!(cfg.legend.row_spacing, 30.0);
        assert_eq!(cfg.legend.swatch_size, 20.0);
        assert_eq!(cfg.sources.url(DatasetKind::Movies), "/data/movies.json");
        assert_eq!(
            cfg.sources.url(DatasetKind::VideoGames),
            DatasetKind::VideoGames.default_url()
        );
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(ChartConfig::from_json("{ width: ").is_err());
        assert!(ChartConfig::from_json(r#"{ "defaultDataset": "books" }"#).is_err());
    }
}
